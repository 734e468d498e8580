//! Deterministic mock provider
//!
//! Answers without any network I/O so agent graphs can run in tests, CI and
//! offline development. Content is picked from the request by a fixed
//! keyword policy (see [`MockProvider`]), so identical inputs give identical
//! outputs, apart from the fallback answer, which embeds the call count.

use crate::messages::last_user_text;
use crate::{
    CompletionRequest, CompletionResponse, LLMProvider, Result, StopReason, TokenUsage,
    ToolExecutor,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

/// Model name reported when none is configured
pub const DEFAULT_MOCK_MODEL: &str = "mock-model";

/// Content returned for JSON-mode requests
pub const MOCK_JSON_RESPONSE: &str =
    r#"{"status": "success", "mock": true, "message": "Mock response"}"#;

/// Number of characters of the user message echoed by the tool-loop answer
const TOOL_CONTEXT_CHARS: usize = 100;

/// Keyword categories in priority order; the first match wins
const RESPONSE_POLICY: &[(&[&str], &str)] = &[
    (
        &["search"],
        "[Mock] Search results: Found 3 relevant sources. \
         1) Example article, 2) Research paper, 3) Documentation.",
    ),
    (
        &["summar"],
        "[Mock] Summary: Key points extracted from the content. \
         Main findings and conclusions included.",
    ),
    (
        &["parse", "extract"],
        "[Mock] Parsed: topic='example', keywords=['mock', 'test']",
    ),
    (
        &["evaluat", "quality"],
        "[Mock] Evaluation: Score 85/100. Quality: Good. Status: Approved.",
    ),
    (
        &["write", "report"],
        "[Mock] Report generated with introduction, findings, \
         and conclusion sections.",
    ),
];

/// Mock LLM provider returning deterministic responses
///
/// `complete` picks its content in this order:
///
/// 1. the fixed override set with [`with_default_response`](Self::with_default_response)
/// 2. a fixed JSON object, when the request wants JSON
/// 3. a canned answer chosen by keywords in the last user message plus the
///    system prompt (search, summary, extraction, evaluation, report)
/// 4. a generic answer naming the call number
///
/// `complete_with_tools` never runs a tool: it answers at once with a
/// terminal response naming the offered tools.
///
/// # Example
///
/// ```
/// use agent_llm::{CompletionRequest, LLMProvider, Message};
/// use agent_llm::providers::MockProvider;
///
/// let llm = MockProvider::new();
/// let request = CompletionRequest::new(vec![Message::user("Please search the docs")]);
/// let response = tokio_test::block_on(llm.complete(request)).unwrap();
///
/// assert!(response.content.starts_with("[Mock] Search results"));
/// assert_eq!(llm.call_count(), 1);
/// ```
#[derive(Debug)]
pub struct MockProvider {
    model: String,
    default_response: Option<String>,
    call_count: AtomicU64,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a mock provider reporting [`DEFAULT_MOCK_MODEL`]
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MOCK_MODEL.to_string(),
            default_response: None,
            call_count: AtomicU64::new(0),
        }
    }

    /// Report a different model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Return `response` from every `complete` call
    ///
    /// An empty string leaves the provider without an override.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        let response = response.into();
        self.default_response = (!response.is_empty()).then_some(response);
        self
    }

    /// Number of top-level calls since construction or the last [`reset`](Self::reset)
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call counter to zero
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn next_call(&self) -> u64 {
        self.call_count.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Pick the canned answer for a user message and system prompt
fn contextual_response(user_message: &str, system: &str, call_count: u64) -> String {
    let combined = format!("{user_message}{system}").to_lowercase();

    RESPONSE_POLICY
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| combined.contains(k)))
        .map_or_else(
            || {
                format!(
                    "[Mock] Processed request (call #{call_count}). \
                     This is a mock response for testing without API calls."
                )
            },
            |(_, response)| (*response).to_string(),
        )
}

/// Render names as a single-quoted list: `['a', 'b']`
fn quoted_list(names: &[&str]) -> String {
    let items: Vec<String> = names.iter().map(|name| quote(name)).collect();
    format!("[{}]", items.join(", "))
}

/// Quote `s` with single quotes, or double quotes if it holds only single quotes
fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

#[async_trait]
impl LLMProvider for MockProvider {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let call_count = self.next_call();

        let content = if let Some(response) = &self.default_response {
            response.clone()
        } else if request.wants_json() {
            MOCK_JSON_RESPONSE.to_string()
        } else {
            contextual_response(
                &last_user_text(&request.messages),
                &request.system,
                call_count,
            )
        };

        let usage = TokenUsage::approximate(&request.messages, &content);
        debug!(
            call_count,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Mock completion"
        );

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            usage,
            stop_reason: StopReason::EndTurn,
            tool_calls: Vec::new(),
            raw_response: json!({ "mock": true, "call_count": call_count }),
        })
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete_with_tools(
        &self,
        request: CompletionRequest,
        _tool_executor: &dyn ToolExecutor,
        max_iterations: usize,
    ) -> Result<CompletionResponse> {
        let call_count = self.next_call();

        let context: String = last_user_text(&request.messages)
            .chars()
            .take(TOOL_CONTEXT_CHARS)
            .collect();
        let tool_names = request.tool_names();
        let content = format!(
            "[Mock] Processed with tools: {}. Context: {context}...",
            quoted_list(&tool_names)
        );

        let usage = TokenUsage::approximate(&request.messages, &content);
        debug!(
            call_count,
            tool_count = tool_names.len(),
            max_iterations,
            output_tokens = usage.output_tokens,
            "Mock tool loop"
        );

        Ok(CompletionResponse {
            model: self.model.clone(),
            usage,
            stop_reason: StopReason::EndTurn,
            tool_calls: Vec::new(),
            raw_response: json!({ "mock": true, "tools_available": tool_names }),
            content,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
