//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the agent-rs workspace:
//! the process-wide logging configurator and the layered configuration file
//! that selects a completion provider.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, LoggingSettings, ProviderSettings};
pub use error::{Result, UtilsError};
pub use logging::{
    ConsoleStream, LogLevel, Logger, LoggingConfig, LoggingHandle, VALID_LOG_LEVELS,
    build_subscriber, get_logger, setup_logging,
};
