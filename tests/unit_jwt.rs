use lectern::config::jwt::JwtConfig;
use lectern::modules::profiles::model::Role;
use lectern::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn config(secret: &str) -> JwtConfig {
    JwtConfig {
        secret: secret.to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_token_round_trip() {
    let jwt_config = config("unit-test-secret");
    let profile_id = Uuid::new_v4();

    let token =
        create_access_token(profile_id, "user@example.com", Role::Student, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, profile_id.to_string());
    assert_eq!(claims.email, "user@example.com");
    assert_eq!(claims.role, "student");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_token_carries_admin_role() {
    let jwt_config = config("unit-test-secret");
    let token =
        create_access_token(Uuid::new_v4(), "admin@example.com", Role::Admin, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(Role::parse(&claims.role), Some(Role::Admin));
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let token = create_access_token(
        Uuid::new_v4(),
        "user@example.com",
        Role::Student,
        &config("secret-a"),
    )
    .unwrap();

    assert!(verify_token(&token, &config("secret-b")).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    assert!(verify_token("not.a.token", &config("unit-test-secret")).is_err());
    assert!(verify_token("", &config("unit-test-secret")).is_err());
}
