use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Access-token lifetime in minutes. Expiry is the only invalidation
    /// mechanism; there is no server-side revocation.
    pub token_ttl_minutes: i64,
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded images, served under `/static/images`.
    pub media_dir: PathBuf,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct I18nConfig {
    /// Directory holding one `<code>.json` translation file per language.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub i18n: I18nConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://portfolio.db?mode=rwc")?
            .set_default("auth.token_ttl_minutes", 30)?
            .set_default("auth.admin_username", "admin")?
            .set_default("storage.media_dir", "static/images")?
            .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
            .set_default("i18n.dir", "i18n")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PORTFOLIO__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("PORTFOLIO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
