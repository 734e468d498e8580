//! Error types for tool execution

use thiserror::Error;

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that can occur while looking up or running a tool
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool registered under this name
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments do not match what the tool expects
    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    /// The tool ran and failed
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
