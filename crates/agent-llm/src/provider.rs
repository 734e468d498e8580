//! LLM provider trait definition

use crate::tool_loop::run_tool_loop;
use crate::{CompletionRequest, CompletionResponse, Result, ToolExecutor};
use async_trait::async_trait;

/// Default bound on tool rounds for [`LLMProvider::complete_with_tools`]
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Trait for LLM providers
///
/// Implementations of this trait give the agent graph completions from a
/// particular backend (a hosted model, or [`MockProvider`] in tests and
/// offline runs). Callers hold an `Arc<dyn LLMProvider>` and never depend on
/// which backend is behind it.
///
/// [`MockProvider`]: crate::providers::MockProvider
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a single completion
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with messages, tools, and parameters
    ///
    /// # Returns
    ///
    /// Exactly one response. When the request wants JSON, its content is
    /// valid JSON text.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Run the tool-use loop until the model produces a terminal response
    ///
    /// The default implementation drives [`complete`](Self::complete):
    /// each `tool_use` response has its calls run through `tool_executor`
    /// and the results appended as `tool` messages before asking again. At
    /// most `max_iterations` rounds of tool execution take place; a tool
    /// request beyond that fails with
    /// [`LLMError::IterationBoundExceeded`](crate::LLMError::IterationBoundExceeded).
    async fn complete_with_tools(
        &self,
        request: CompletionRequest,
        tool_executor: &dyn ToolExecutor,
        max_iterations: usize,
    ) -> Result<CompletionResponse> {
        run_tool_loop(self, request, tool_executor, max_iterations).await
    }

    /// Get the provider name (e.g., "mock")
    fn name(&self) -> &str;

    /// Get the model identifier reported in responses
    fn model(&self) -> &str;
}
