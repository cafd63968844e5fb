//! Service settings

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::Level;

const CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "DELIVERY";
const CONFIG_PATH_VAR: &str = "DELIVERY_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid log level '{0}' (expected trace, debug, info, warn or error)")]
    InvalidLogLevel(String),
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reference table location
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the four reference CSV files
    pub dir: PathBuf,
}

/// Classifier settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// ONNX model path; without one the service runs with no classifier
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Use the rule-based mock classifier when no path is set
    pub mock: bool,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl LoggingConfig {
    /// Parsed maximum log level
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.level.clone()))
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("data.dir", "data")?
        .set_default("model.mock", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.json", false)
}

impl AppConfig {
    /// Load defaults, then `config/default`, then the file named by
    /// `DELIVERY_CONFIG`, then `DELIVERY__*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = defaults()?
            .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false));

        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            builder = builder.add_source(File::with_name(&path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.logging.max_level()?;
        Ok(app)
    }

    /// Defaults overlaid with an inline TOML document
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.logging.max_level()?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert!(config.model.path.is_none());
        assert!(!config.model.mock);
        assert_eq!(config.logging.max_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [model]
            path = "models/delivery.onnx"

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.model.path, Some(PathBuf::from("models/delivery.onnx")));
        assert_eq!(config.logging.max_level().unwrap(), Level::DEBUG);
        assert!(config.logging.json);
    }

    #[test]
    fn test_invalid_log_level() {
        let err = AppConfig::from_toml("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(level) if level == "loud"));
    }
}
