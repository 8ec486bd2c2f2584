//! Application configuration
//!
//! Loaded from a TOML file, by default `~/.config/resort-booking/config.toml`.
//! Every section and field has a default, so a missing file or a partial one
//! is fine.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! backend = "sqlite"
//! path = "./resort-booking.db"
//!
//! [booking]
//! currency = "EUR"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::retry::RetryConfig;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "RESORT_BOOKING_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub booking: BookingSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: "./resort-booking.db".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match self.backend {
            StorageBackend::Memory => "memory".to_string(),
            StorageBackend::Sqlite => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
    /// Display currency code
    pub currency: String,
    /// Attempts per create request when the write races another booking
    pub conflict_retry_attempts: u32,
    pub conflict_retry_delay_ms: u64,
    /// Insert the default rooms into an empty catalog on startup
    pub seed_catalog: bool,
    /// Longest stay, in nights, that can be quoted or booked
    pub max_nights: u32,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            conflict_retry_attempts: 2,
            conflict_retry_delay_ms: 50,
            seed_catalog: true,
            max_nights: 365,
        }
    }
}

impl BookingSettings {
    pub fn conflict_retry(&self) -> RetryConfig {
        RetryConfig::for_booking_conflicts(
            self.conflict_retry_attempts,
            Duration::from_millis(self.conflict_retry_delay_ms),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
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

/// `$RESORT_BOOKING_CONFIG`, else `~/.config/resort-booking/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resort-booking")
        .join("config.toml")
}

impl AppConfig {
    /// Read and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).map_err(|e| match e {
                ConfigError::Parse { source, .. } => ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.booking.conflict_retry_attempts == 0 {
            return Err(ConfigError::Invalid(
                "booking.conflict_retry_attempts must be at least 1".into(),
            ));
        }
        if self.booking.max_nights == 0 {
            return Err(ConfigError::Invalid(
                "booking.max_nights must be at least 1".into(),
            ));
        }
        if self.booking.currency.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "booking.currency must not be empty".into(),
            ));
        }
        if !matches!(
            self.logging.format.to_lowercase().as_str(),
            "text" | "json"
        ) {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.booking.currency, "USD");
        assert!(config.booking.seed_catalog);
        assert_eq!(config.booking.max_nights, 365);
        assert_eq!(config.logging.format, "text");
        config.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [database]
            backend = "memory"

            [booking]
            currency = "EUR"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.booking.currency, "EUR");
        assert_eq!(config.booking.conflict_retry_attempts, 2);
    }

    #[test]
    fn rejects_invalid_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.booking.conflict_retry_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.booking.max_nights = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.booking.currency = "  ".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = 1"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("resort-booking-does-not-exist.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn load_reads_and_validates_file() {
        let path = std::env::temp_dir().join(format!(
            "resort-booking-config-{}.toml",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn sqlite_url_creates_file() {
        let db = DatabaseSettings::default();
        assert_eq!(db.connection_url(), "sqlite://./resort-booking.db?mode=rwc");
    }
}
