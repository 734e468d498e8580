//! Completion request and response types

use crate::{LLMError, Message, Result, ToolCall, ToolDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Default output bound when the caller does not set one
pub const DEFAULT_MAX_TOKENS: usize = 1024;

/// Request for LLM completion with full conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Conversation history, oldest first
    pub messages: Vec<Message>,

    /// System prompt (may be empty)
    #[serde(default)]
    pub system: String,

    /// Tools offered to the model; it is free not to use them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    /// Maximum tokens to generate (enforced by the backend)
    pub max_tokens: usize,

    /// Structured output request, e.g. `{"type": "json_object"}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,

    /// Ask for syntactically valid JSON content
    #[serde(default)]
    pub json_mode: bool,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// Response from LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,

    /// Model identifier reported by the backend
    pub model: String,

    /// Token usage statistics
    pub usage: TokenUsage,

    /// Why generation stopped
    pub stop_reason: StopReason,

    /// Tool invocations requested when `stop_reason` is `ToolUse`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,

    /// Backend-specific diagnostic metadata
    #[serde(default)]
    pub raw_response: Value,
}

/// Reason the LLM stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion (end of turn)
    EndTurn,

    /// Hit max tokens limit
    MaxTokens,

    /// Stop sequence encountered
    StopSequence,

    /// Tool use requested
    ToolUse,
}

impl StopReason {
    /// Wire name of the stop reason
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndTurn => "end_turn",
            Self::MaxTokens => "max_tokens",
            Self::StopSequence => "stop_sequence",
            Self::ToolUse => "tool_use",
        }
    }

    /// Whether the exchange is over (anything but a tool request)
    pub fn is_terminal(self) -> bool {
        self != Self::ToolUse
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }

    /// Four-characters-per-token estimate for backends without a tokenizer
    ///
    /// Input is measured on the JSON serialization of the whole history,
    /// output on the content. Lengths count characters, not bytes, and both
    /// use integer division.
    pub fn approximate(messages: &[Message], content: &str) -> Self {
        let serialized = serde_json::to_string(messages).map_or(0, |s| s.chars().count());
        Self {
            input_tokens: serialized / 4,
            output_tokens: content.chars().count() / 4,
        }
    }
}

impl CompletionRequest {
    /// Create a request for the given history with default parameters
    pub fn new(messages: Vec<Message>) -> Self {
        Self::builder().messages(messages).build()
    }

    /// Create a builder for completion requests
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::new()
    }

    /// Whether the caller asked for JSON output
    ///
    /// True for `json_mode`, or a `response_format` whose `type` is
    /// `json_object` or `json_schema`.
    pub fn wants_json(&self) -> bool {
        self.json_mode
            || self
                .response_format
                .as_ref()
                .and_then(|format| format.get("type"))
                .and_then(Value::as_str)
                .is_some_and(|kind| matches!(kind, "json_object" | "json_schema"))
    }

    /// Names of the offered tools, in request order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .flatten()
            .map(|tool| tool.name.as_str())
            .collect()
    }

    /// Reject requests no backend can serve
    pub fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(LLMError::InvalidInput(
                "messages must contain at least one message".to_string(),
            ));
        }
        Ok(())
    }
}

impl CompletionResponse {
    /// The assistant turn this response represents, for appending to history
    pub fn to_message(&self) -> Message {
        if self.tool_calls.is_empty() {
            Message::assistant(self.content.clone())
        } else {
            Message::assistant_tool_calls(&self.content, &self.tool_calls)
        }
    }
}

/// Builder for CompletionRequest
#[derive(Debug, Default)]
pub struct CompletionRequestBuilder {
    messages: Vec<Message>,
    system: String,
    tools: Option<Vec<ToolDefinition>>,
    max_tokens: Option<usize>,
    response_format: Option<Value>,
    json_mode: bool,
    temperature: Option<f32>,
    stop_sequences: Option<Vec<String>>,
}

impl CompletionRequestBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conversation messages
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Add a single message
    pub fn add_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Set the available tools
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request a structured response format
    pub fn response_format(mut self, format: Value) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Request JSON content
    pub fn json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set stop sequences
    pub fn stop_sequences(mut self, sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(sequences);
        self
    }

    /// Build the completion request
    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            messages: self.messages,
            system: self.system,
            tools: self.tools,
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            response_format: self.response_format,
            json_mode: self.json_mode,
            temperature: self.temperature,
            stop_sequences: self.stop_sequences,
        }
    }
}
