//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LLMError {
    /// Request cannot be processed as given (e.g. empty conversation)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tool-use loop kept requesting tools past its bound
    #[error("Tool loop exceeded {max_iterations} iterations without a terminal response")]
    IterationBoundExceeded {
        /// Bound that was in effect
        max_iterations: usize,
    },

    /// A caller-supplied tool failed
    #[error("Tool '{name}' failed: {message}")]
    ToolExecutionFailed {
        /// Tool name as requested by the model
        name: String,
        /// Failure description
        message: String,
    },

    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Provider-specific error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// Whether this error came from the backend rather than the caller or loop
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_)
                | Self::AuthenticationFailed
                | Self::RateLimitExceeded(_)
                | Self::InvalidRequest(_)
                | Self::ModelNotFound(_)
                | Self::UnexpectedResponse(_)
                | Self::ProviderError(_)
        )
    }
}
