//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Application metadata shown by the health endpoint.
    #[serde(default)]
    pub app: AppInfo,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

const fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Application metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    /// Human readable application title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Short description of the service.
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
        }
    }
}

fn default_title() -> String {
    "QRKot".to_string()
}

fn default_description() -> String {
    "Charitable fund for cat support".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `QRKOT__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("QRKOT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-missing-profile")),
                ("QRKOT__DATABASE__URL", Some("sqlite::memory:")),
                ("QRKOT__JWT__SECRET", Some("s3cret")),
            ],
            || {
                let config = AppConfig::load().unwrap();

                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
                assert_eq!(config.jwt.secret, "s3cret");
                assert_eq!(config.jwt.access_token_expiry_secs, 900);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.app.title, "QRKot");
            },
        );
    }

    #[test]
    fn test_load_env_overrides_defaults() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-missing-profile")),
                ("QRKOT__DATABASE__URL", Some("postgres://localhost/qrkot")),
                ("QRKOT__JWT__SECRET", Some("s3cret")),
                ("QRKOT__SERVER__PORT", Some("9000")),
                ("QRKOT__APP__TITLE", Some("Cat Fund")),
            ],
            || {
                let config = AppConfig::load().unwrap();

                assert_eq!(config.server.port, 9000);
                assert_eq!(config.app.title, "Cat Fund");
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-missing-profile")),
                ("QRKOT__DATABASE__URL", None),
                ("QRKOT__JWT__SECRET", Some("s3cret")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
