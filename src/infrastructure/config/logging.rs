//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
///
/// `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so they never mix with command output on stdout.
    /// Calling this twice is harmless; the second subscriber is discarded.
    pub fn init(&self) {
        let _ = self.try_init();
    }

    /// Same as [`LoggingConfig::init`] with `level` raised for `-v` flags.
    pub fn init_with_verbosity(&self, verbose: u8) {
        let config = Self {
            level: self.level_for(verbose).to_string(),
            format: self.format.clone(),
        };
        config.init();
    }

    fn level_for(&self, verbose: u8) -> &str {
        match verbose {
            0 => self.level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn try_init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
