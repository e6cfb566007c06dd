//! Logging setup for the wallet SDK.
//!
//! Thin layer over `tracing` / `tracing-subscriber` with a choice of output
//! formats and environment-variable overrides.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ethwallet_rs::logging::{init_default_logging, init_logging, LoggingConfig, LogFormat};
//!
//! // Initialize with defaults (INFO level, text format)
//! init_default_logging();
//!
//! // Or configure logging explicitly
//! let config = LoggingConfig {
//!     debug: true,
//!     format: LogFormat::Json,
//!     ..Default::default()
//! };
//! init_logging(&config);
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Static initialization guard to ensure logging is only initialized once
static INIT: Once = Once::new();

/// Flag indicating whether logging has been initialized
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text format with timestamps
    #[default]
    Text,
    /// JSON format for structured logging and log aggregation
    Json,
    /// Compact single-line format for development
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!(
                "Invalid log format '{}'. Valid options: text, json, compact",
                s
            )),
        }
    }
}

/// Logging configuration for the wallet SDK
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Enable debug-level logging (sets minimum level to DEBUG)
    pub debug: bool,
    /// Enable trace-level logging (sets minimum level to TRACE, overrides debug)
    pub trace: bool,
    /// Output format for log messages
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Create a new LoggingConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable trace logging
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Set the log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - `ETHWALLET_DEBUG`: Enable debug mode (any value)
    /// - `ETHWALLET_TRACE`: Enable trace mode (any value)
    /// - `ETHWALLET_LOG_FORMAT`: Set format (text, json, compact)
    /// - `RUST_LOG`: Standard tracing filter (takes precedence if set)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if std::env::var("ETHWALLET_DEBUG").is_ok() || std::env::var("ETHWALLET_TRACE").is_ok() {
            config.debug = true;
        }

        if std::env::var("ETHWALLET_TRACE").is_ok() {
            config.trace = true;
        }

        if let Ok(format) = std::env::var("ETHWALLET_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                config.format = f;
            }
        }

        config
    }

    /// Get the effective log level based on configuration
    fn get_level(&self) -> Level {
        if self.trace {
            Level::TRACE
        } else if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

/// Initialize the logging system with the given configuration.
///
/// This function can only be called once; subsequent calls will be ignored.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        init_logging_internal(config);
        INITIALIZED.store(true, Ordering::SeqCst);
    });
}

/// Initialize logging with default configuration (INFO level, text format).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

/// Check if logging has been initialized
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Internal initialization logic
fn init_logging_internal(config: &LoggingConfig) {
    // Allow RUST_LOG to override, otherwise use config-based level
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.get_level().to_string())
    };

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(io::stdout))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stdout))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(io::stdout))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.debug);
        assert!(!config.trace);
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new()
            .with_debug(true)
            .with_format(LogFormat::Json);

        assert!(config.debug);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(format!("{}", LogFormat::Text), "text");
        assert_eq!(format!("{}", LogFormat::Json), "json");
        assert_eq!(format!("{}", LogFormat::Compact), "compact");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("invalid".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_get_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.get_level(), Level::INFO);

        let config = LoggingConfig::default().with_debug(true);
        assert_eq!(config.get_level(), Level::DEBUG);

        // trace takes precedence over debug
        let config = LoggingConfig::default().with_debug(true).with_trace(true);
        assert_eq!(config.get_level(), Level::TRACE);
    }
}
