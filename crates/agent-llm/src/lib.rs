//! LLM provider abstraction layer for agent-rs
//!
//! This crate lets an agent graph obtain completions from an interchangeable
//! backend without depending on which one is active. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Tool definitions, tool calls, and the [`ToolExecutor`] capability
//! - The [`LLMProvider`] trait, whose default `complete_with_tools` runs the
//!   bounded tool-use loop
//! - [`providers::MockProvider`], a deterministic backend for tests and
//!   offline runs

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod tool_loop;
pub mod tools;

// Re-export main types
pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, DEFAULT_MAX_TOKENS,
    StopReason, TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::{DEFAULT_MAX_ITERATIONS, LLMProvider};
pub use tools::{ToolCall, ToolDefinition, ToolExecutor};
