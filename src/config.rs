//! Application configuration
//!
//! Loaded from a TOML file, then overridden by environment variables:
//!
//! | variable    | field              |
//! |-------------|--------------------|
//! | `GRPC_HOST` | `server.host`      |
//! | `GRPC_PORT` | `server.port`      |
//! | `PG_DSN`    | `database.url`     |
//!
//! A missing file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;

pub const ENV_HOST: &str = "GRPC_HOST";
pub const ENV_PORT: &str = "GRPC_PORT";
pub const ENV_DSN: &str = "PG_DSN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests to finish on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50051,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `<config dir>/auth-service/config.toml`, or `./auth-service/config.toml`
/// when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auth-service")
        .join("config.toml")
}

impl AppConfig {
    /// Load from `path`, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_from(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.is_empty()) {
            self.server.host = host;
        }

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_PORT,
                value: port.clone(),
            })?;
        }

        if let Some(dsn) = lookup(ENV_DSN).filter(|v| !v.is_empty()) {
            self.database.url = dsn;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }

        let pool = &self.database.pool;
        if pool.min_connections > pool.max_connections {
            return Err(ConfigError::Invalid(format!(
                "database.pool.min_connections ({}) exceeds max_connections ({})",
                pool.min_connections, pool.max_connections
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.address(), "127.0.0.1:50051");
        assert_eq!(config.server.shutdown_timeout, 30);
        assert_eq!(config.database.pool.max_connections, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 6000

            [database]
            url = "postgres://u:p@db:5432/users"

            [database.pool]
            max_connections = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 6000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url, "postgres://u:p@db:5432/users");
        assert_eq!(config.database.pool.max_connections, 4);
        assert_eq!(config.database.pool.min_connections, 1);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();

        config
            .apply_env_from(env(&[
                (ENV_HOST, "0.0.0.0"),
                (ENV_PORT, "7000"),
                (ENV_DSN, "postgres://env/db"),
            ]))
            .unwrap();

        assert_eq!(config.server.address(), "0.0.0.0:7000");
        assert_eq!(config.database.url, "postgres://env/db");
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let mut config = AppConfig::default();

        config.apply_env_from(env(&[(ENV_HOST, "")])).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let mut config = AppConfig::default();

        let err = config
            .apply_env_from(env(&[(ENV_PORT, "grpc")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_PORT, .. }));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.database.url = "  ".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.database.pool.min_connections = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("auth-service-does-not-exist.toml");

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.server.shutdown_timeout, 30);
    }

    #[test]
    fn default_path_ends_with_service_dir() {
        let path = default_config_path();
        assert!(path.ends_with("auth-service/config.toml"));
    }
}
