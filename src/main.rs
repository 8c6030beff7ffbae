use dotenvy::dotenv;
use lectern::cli;
use lectern::router::init_router;
use lectern::state::init_app_state;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    // Normal server startup
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state().await;
    let port = state.server_config.port;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    println!("🚀 Server running on http://localhost:{}", port);
    println!("📚 Swagger UI available at http://localhost:{}/swagger-ui", port);
    println!("📖 Scalar UI available at http://localhost:{}/scalar", port);
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <name> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match cli::create_admin(&pool, name, email, password).await {
        Ok(_) => {
            println!("✅ Admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}
