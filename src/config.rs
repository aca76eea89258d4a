//! Configuration management for the file store server
//!
//! Values come from built-in defaults, an optional `config.toml` in the
//! working directory and `FILE_STORE_*` environment variables, in that order
//! of precedence.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const MIN_BUFFER_SIZE: usize = 1024;
const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Directory under which every client-visible file and folder lives
    pub storage_root: String,

    /// Capacity of the intermediate buffer used by streaming copies
    pub buffer_size: usize,

    /// Number of HTTP worker threads, actix picks one per core when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            storage_root: "./store".to_string(),
            buffer_size: 64 * 1024,
            workers: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `file_name` (without extension) as the optional file source
    pub fn load_from(file_name: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("storage_root", defaults.storage_root)?
            .set_default("buffer_size", defaults.buffer_size as i64)?
            .add_source(File::with_name(file_name).required(false))
            .add_source(Environment::with_prefix("FILE_STORE").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.storage_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage_root cannot be empty".into(),
            ));
        }

        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            return Err(config::ConfigError::Message(format!(
                "buffer_size must be between {MIN_BUFFER_SIZE} and {MAX_BUFFER_SIZE} bytes"
            )));
        }

        if self.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "workers must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage_root_path(), PathBuf::from("./store"));
    }

    #[test]
    fn rejects_zero_port() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_storage_root() {
        let config = ServerConfig {
            storage_root: "  ".into(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_buffer() {
        let tiny = ServerConfig {
            buffer_size: 16,
            ..ServerConfig::default()
        };
        assert!(tiny.validate().is_err());

        let huge = ServerConfig {
            buffer_size: MAX_BUFFER_SIZE + 1,
            ..ServerConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn rejects_zero_workers() {
        let config = ServerConfig {
            workers: Some(0),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_defaults_when_file_is_missing() {
        let config = ServerConfig::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(config.buffer_size, 64 * 1024);
        assert!(config.workers.is_none());
    }
}
