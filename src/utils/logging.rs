//! Logging configuration and subscriber setup

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{StitchError, StitchResult};

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
}

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// General information
    Info,
    /// Debug information
    Debug,
    /// Very verbose debug information
    Trace,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> StitchResult<Self> {
        match level_str.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(StitchError::Config {
                message: format!(
                    "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                    level_str
                ),
            }),
        }
    }

    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    /// Parse log format from string
    pub fn parse(format_str: &str) -> StitchResult<Self> {
        match format_str.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(StitchError::Config {
                message: format!(
                    "Invalid log format: {}. Valid formats: pretty, compact, json",
                    format_str
                ),
            }),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Install the global subscriber. `RUST_LOG` wins over the configured level.
    ///
    /// Logs go to stderr so that JSON reports on stdout stay machine-readable.
    pub fn initialize(&self) -> StitchResult<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_filter()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let result = match self.config.format {
            LogFormat::Pretty => builder.try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        result.map_err(|e| StitchError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

        tracing::debug!(
            level = ?self.config.level,
            format = ?self.config.format,
            "Logging system initialized"
        );
        Ok(())
    }

    /// Log version and platform once at startup
    pub fn log_system_info(&self) {
        tracing::info!("StitchX {}", env!("CARGO_PKG_VERSION"));

        #[cfg(target_os = "macos")]
        tracing::debug!("Platform: macOS");
        #[cfg(target_os = "linux")]
        tracing::debug!("Platform: Linux");
        #[cfg(target_os = "windows")]
        tracing::debug!("Platform: Windows");
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::parse("loud").is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Compact ").unwrap(), LogFormat::Compact);
        assert!(LogFormat::parse("xml").is_err());
    }
}
