//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all client settings.
//! Configuration is loaded from a TOML file; `STOREFRONT_API_URL` in the
//! environment (or a `.env` file) overrides the configured backend URL.
//!
//! # Example
//!
//! ```no_run
//! use storefront::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::http::ApiConfig;
use crate::adapter::outbound::storage::StorageConfig;
use crate::error::{ConfigError, Result};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Main client configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the session and cart are kept between runs.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `STOREFRONT_API_URL` override before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults (still
    /// honouring the environment override).
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        if self.api.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::storage::StorageBackend;
    use crate::error::Error;

    // Tests in this module avoid STOREFRONT_API_URL; the override is
    // covered by the integration tests, which run in their own process.

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_ms, None);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn full_file_parses() {
        let toml = r#"
            [api]
            base_url = "https://shop.example.com/api/"
            timeout_ms = 5000

            [storage]
            backend = "memory"
            path = "/tmp/storefront.json"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config = Config::parse_toml(toml).unwrap();

        assert_eq!(config.api.timeout_ms, Some(5000));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(
            config.storage.path.as_deref(),
            Some(Path::new("/tmp/storefront.json"))
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = Config::parse_toml("[api]\nbase_url = \"not a url\"").unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "base_url", .. })
        ));
    }

    #[test]
    fn rejects_blank_base_url() {
        let err = Config::parse_toml("[api]\nbase_url = \"  \"").unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "base_url" })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::parse_toml("[api]\ntimeout_ms = 0").unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "timeout_ms", .. })
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = Config::parse_toml("[logging]\nformat = \"xml\"").unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "format", .. })
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml("[api").unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
