//! Error types for agent-utils

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for agent-utils
pub type Result<T> = std::result::Result<T, UtilsError>;

/// Errors raised while configuring logging or loading configuration
#[derive(Error, Debug)]
pub enum UtilsError {
    /// Log level string is not one of the supported levels
    #[error("Invalid log level '{level}'. Valid levels are: {valid}")]
    InvalidLogLevel {
        /// Level as supplied by the caller
        level: String,
        /// Comma-separated list of accepted levels
        valid: String,
    },

    /// Log file (or its parent directory) could not be created
    #[error("Failed to open log file '{}': {source}", .path.display())]
    LogFile {
        /// Requested log destination
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),

    /// The live log filter could not be swapped
    #[error("Failed to reload log filter: {0}")]
    Reload(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}
