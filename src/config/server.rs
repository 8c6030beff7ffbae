use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the built SPA assets served for the page routes.
    pub static_dir: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }
}
