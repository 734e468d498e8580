//! Tool types for LLM tool use
//!
//! [`ToolDefinition`] describes a tool offered to the model, [`ToolCall`] is
//! a request from the model to run one, and [`ToolExecutor`] is the
//! caller-supplied capability that actually runs it.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition for LLM provider
///
/// This describes a tool that the LLM can use, including its name,
/// description, and input schema in JSON Schema format. Names must be
/// unique within one request's tool set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Backend-assigned identifier, echoed in the matching tool result
    pub id: String,

    /// Name of the requested tool
    pub name: String,

    /// Arguments (JSON)
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// Runs tools on behalf of the tool-use loop
///
/// Implemented for plain closures; use [`tool_fn`] to pin down a closure's
/// signature when passing it as `&dyn ToolExecutor`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Run the named tool with the given arguments
    async fn execute(&self, name: &str, input: Value) -> Result<Value>;
}

#[async_trait]
impl<F> ToolExecutor for F
where
    F: Fn(&str, Value) -> Result<Value> + Send + Sync,
{
    async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        self(name, input)
    }
}

/// Identity helper that gives a closure the signature [`ToolExecutor`] expects
///
/// # Example
///
/// ```
/// use agent_llm::tools::{tool_fn, ToolExecutor};
/// use serde_json::json;
///
/// let executor = tool_fn(|name, input| Ok(json!({ "tool": name, "echo": input })));
/// let output = tokio_test::block_on(executor.execute("echo", json!(1))).unwrap();
/// assert_eq!(output["tool"], "echo");
/// ```
pub fn tool_fn<F>(f: F) -> F
where
    F: Fn(&str, Value) -> Result<Value> + Send + Sync,
{
    f
}

/// Render tool output as the text of a tool-result message
///
/// Strings are passed through unquoted; other values are serialized JSON.
pub fn render_tool_output(output: &Value) -> String {
    match output {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use agent_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "query": schema::string("Search query"),
    ///         "limit": schema::integer("Maximum results"),
    ///     }),
    ///     vec!["query"],
    /// );
    /// assert_eq!(schema["required"][0], "query");
    /// ```
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Number property schema
    pub fn number(description: &str) -> Value {
        json!({
            "type": "number",
            "description": description,
        })
    }

    /// Integer property schema
    pub fn integer(description: &str) -> Value {
        json!({
            "type": "integer",
            "description": description,
        })
    }

    /// Boolean property schema
    pub fn boolean(description: &str) -> Value {
        json!({
            "type": "boolean",
            "description": description,
        })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}
