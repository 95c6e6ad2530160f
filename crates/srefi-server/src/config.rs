use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Unset means 1 for in-memory SQLite, 10 otherwise.
    #[serde(default)]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_jwt_secret() -> String {
    "srefi-dev-secret-change-in-production".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_session_ttl_secs() -> u64 {
    86400
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
        }
    }
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }

    pub fn pool_size(&self) -> u32 {
        match self.max_connections {
            Some(n) => n,
            None if self.is_memory() => 1,
            None => 10,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
            session_ttl_secs: default_session_ttl_secs(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Optional TOML file at `path`, overridden by `SREFI__SECTION__KEY`
    /// environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("SREFI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
