use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Print spans and fields in the multi-line pretty format
    #[serde(default)]
    pub pretty: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            pretty: false,
        }
    }
}

fn default_min_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let level = self.min_level.trim().to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "logging.min_level",
                value: self.min_level.clone(),
                reason: "expected one of trace, debug, info, warn, error",
            });
        }
        Ok(())
    }

    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.min_level.trim().to_ascii_lowercase()))
    }
}
