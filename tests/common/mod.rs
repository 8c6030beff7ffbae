use lectern::config::cors::CorsConfig;
use lectern::config::jwt::JwtConfig;
use lectern::config::server::ServerConfig;
use lectern::router::init_router;
use lectern::state::AppState;
use lectern::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestAccount {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn build_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        server_config: ServerConfig {
            port: 3000,
            static_dir: "static".to_string(),
        },
        cache: None,
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Insert an identity + profile pair with the given role.
#[allow(dead_code)]
pub async fn create_test_account(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> TestAccount {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO identities (email, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO profiles (id, name, email, role) VALUES ($1, $2, $3, $4::profile_role)")
        .bind(id)
        .bind("Test User")
        .bind(email)
        .bind(role)
        .execute(pool)
        .await
        .unwrap();

    TestAccount {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_course(pool: &PgPool, title: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (title, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(title)
    .bind(Some("Test course description"))
    .fetch_one(pool)
    .await
    .unwrap()
}
