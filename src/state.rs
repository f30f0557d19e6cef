use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub auth: AuthConfig,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret: String,
}

pub const DEFAULT_SECRET: &str = "dev-secret-change-me";

impl AuthConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        if secret == DEFAULT_SECRET {
            log::warn!("JWT_SECRET not set. Using the built-in development secret. Set JWT_SECRET in production.");
        }
        Self { secret }
    }
}
