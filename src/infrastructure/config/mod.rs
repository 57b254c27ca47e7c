use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "location_import.toml";
pub const ENV_PREFIX: &str = "LOCATION_IMPORT_";

/// Runtime settings: defaults, then `location_import.toml`, then
/// `LOCATION_IMPORT_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub port: u16,
    /// Rows per insert call
    pub batch_size: usize,
    pub max_connections: u32,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// Used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://locations.db".to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 3001,
            batch_size: 50,
            max_connections: 4,
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(AppError::ConfigError("database_url must not be empty".to_string()));
        }
        if self.batch_size == 0 {
            return Err(AppError::ConfigError("batch_size must be > 0".to_string()));
        }
        if self.max_connections == 0 {
            return Err(AppError::ConfigError("max_connections must be > 0".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(AppError::ConfigError("max_upload_bytes must be > 0".to_string()));
        }
        Ok(())
    }
}
