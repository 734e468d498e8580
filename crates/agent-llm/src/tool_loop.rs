//! Bounded tool-use loop shared by every provider
//!
//! The loop is a small state machine:
//!
//! 1. Ask the model (`complete`) with the current conversation
//! 2. A terminal stop reason ends the loop with that response
//! 3. A `tool_use` response has its calls executed, the assistant turn and
//!    one `tool` message per call are appended, and the loop goes back to 1
//!
//! Step 3 runs at most `max_iterations` times.

use crate::tools::render_tool_output;
use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, ToolExecutor,
};
use tracing::{debug, info, warn};

/// Drive `provider` through the tool-use loop
pub async fn run_tool_loop<P>(
    provider: &P,
    request: CompletionRequest,
    tool_executor: &dyn ToolExecutor,
    max_iterations: usize,
) -> Result<CompletionResponse>
where
    P: LLMProvider + ?Sized,
{
    request.validate()?;

    let mut request = request;
    let mut tool_rounds = 0;

    loop {
        debug!(
            provider = provider.name(),
            tool_rounds,
            message_count = request.messages.len(),
            "Awaiting model response"
        );
        let response = provider.complete(request.clone()).await?;

        if response.stop_reason.is_terminal() {
            info!(
                tool_rounds,
                stop_reason = %response.stop_reason,
                output_tokens = response.usage.output_tokens,
                "Tool loop completed"
            );
            return Ok(response);
        }

        if response.tool_calls.is_empty() {
            return Err(LLMError::UnexpectedResponse(
                "tool_use stop reason without any tool calls".to_string(),
            ));
        }

        if tool_rounds >= max_iterations {
            warn!(max_iterations, "Tool loop iteration bound exceeded");
            return Err(LLMError::IterationBoundExceeded { max_iterations });
        }
        tool_rounds += 1;

        request.messages.push(response.to_message());

        for call in &response.tool_calls {
            debug!(tool_name = %call.name, tool_id = %call.id, "Executing tool");
            let message = match tool_executor.execute(&call.name, call.input.clone()).await {
                Ok(output) => Message::tool_result(call.id.clone(), render_tool_output(&output)),
                Err(e) => {
                    warn!(tool_name = %call.name, error = %e, "Tool execution failed");
                    Message::tool_error(call.id.clone(), format!("Error: {e}"))
                }
            };
            request.messages.push(message);
        }
    }
}
