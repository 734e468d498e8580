//! Command-line interface for agent-rs
//!
//! Sends one prompt to the configured provider and prints the answer.
//! Passing `--tool` offers placeholder tools and goes through the tool-use
//! loop instead of a single completion.

use agent_llm::providers::from_settings;
use agent_llm::tools::schema;
use agent_llm::{
    CompletionRequest, CompletionResponse, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS,
    LLMProvider, Message,
};
use agent_tools::{Tool, ToolRegistry};
use agent_utils::{Config, LoggingConfig, setup_logging};
use async_trait::async_trait;
use clap::Parser;
use serde_json::{Value, json};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "agent-cli")]
#[command(about = "Run a completion against a configured LLM provider", long_about = None)]
struct Args {
    /// User message to send
    #[arg(short, long)]
    prompt: String,

    /// System prompt
    #[arg(short, long, default_value = "")]
    system: String,

    /// Ask for JSON output
    #[arg(long)]
    json: bool,

    /// Offer a tool with this name (repeatable)
    #[arg(long = "tool", value_name = "NAME")]
    tools: Vec<String>,

    /// Bound on tool-execution rounds
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Bound on generated tokens
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: usize,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Fixed response for the mock provider
    #[arg(long)]
    default_response: Option<String>,

    /// Log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long)]
    log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print model, stop reason, and token usage after the answer
    #[arg(short, long)]
    verbose: bool,
}

/// Stand-in tool that echoes its arguments back
struct EchoTool {
    name: String,
}

#[async_trait]
impl Tool for EchoTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        Ok(json!({ "tool": self.name, "input": params }))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Echo the arguments back"
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({}), vec![])
    }
}

/// Layer file, environment, and command-line settings, in that order
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .apply_env();

    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if let Some(file) = &args.log_file {
        config.logging.file = Some(file.clone());
    }
    if let Some(model) = &args.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(response) = &args.default_response {
        config.provider.default_response = Some(response.clone());
    }
    Ok(config)
}

/// Logging for the binary; log lines go to stderr so stdout carries only the answer
fn logging_config(config: &Config) -> anyhow::Result<LoggingConfig> {
    Ok(config.logging.to_logging_config()?.log_to_stderr())
}

/// Print the answer, plus diagnostics when `verbose`
fn write_output(
    out: &mut impl Write,
    response: &CompletionResponse,
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "{}", response.content)?;
    if verbose {
        writeln!(out, "model: {}", response.model)?;
        writeln!(out, "stop_reason: {}", response.stop_reason)?;
        writeln!(
            out,
            "tokens: {} in / {} out",
            response.usage.input_tokens, response.usage.output_tokens
        )?;
    }
    out.flush()
}

fn build_registry(names: &[String]) -> ToolRegistry {
    let registry = ToolRegistry::new();
    for name in names {
        registry.register(Arc::new(EchoTool { name: name.clone() }));
    }
    registry
}

async fn run(provider: &dyn LLMProvider, args: &Args) -> anyhow::Result<CompletionResponse> {
    let mut builder = CompletionRequest::builder()
        .add_message(Message::user(args.prompt.as_str()))
        .system(args.system.as_str())
        .max_tokens(args.max_tokens)
        .json_mode(args.json);

    if args.tools.is_empty() {
        return Ok(provider.complete(builder.build()).await?);
    }

    let registry = build_registry(&args.tools);
    builder = builder.tools(registry.definitions());
    debug!(tool_count = registry.len(), "Running tool-use loop");
    Ok(provider
        .complete_with_tools(builder.build(), &registry, args.max_iterations)
        .await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let _logging = setup_logging(&logging_config(&config)?)?;
    debug!(app = %config.app_name, provider = %config.provider.kind, "Starting agent-cli");

    let provider = from_settings(&config.provider)?;
    let response = run(provider.as_ref(), &args).await?;

    info!(
        stop_reason = %response.stop_reason,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "Completion finished"
    );

    write_output(&mut io::stdout().lock(), &response, args.verbose)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::providers::MockProvider;
    use agent_utils::ConsoleStream;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["agent-cli", "--prompt", "search for crates"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.system, "");
        assert!(!args.json);
        assert!(args.tools.is_empty());
        assert_eq!(args.max_iterations, 10);
        assert_eq!(args.max_tokens, 1024);
    }

    #[test]
    fn test_prompt_required() {
        assert!(Args::try_parse_from(["agent-cli"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--log-level",
            "DEBUG",
            "--model",
            "cli-model",
            "--default-response",
            "fixed",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.logging.level, "DEBUG");
        assert_eq!(config.provider.model.as_deref(), Some("cli-model"));
        assert_eq!(config.provider.default_response.as_deref(), Some("fixed"));
    }

    #[tokio::test]
    async fn test_run_single_completion() {
        let provider = MockProvider::new();
        let response = run(&provider, &parse(&["--json"])).await.unwrap();
        assert!(serde_json::from_str::<Value>(&response.content).is_ok());
    }

    #[test]
    fn test_logs_go_to_stderr() {
        let config = load_config(&parse(&["--log-level", "DEBUG"])).unwrap();
        let logging = logging_config(&config).unwrap();
        assert_eq!(logging.console, ConsoleStream::Stderr);
    }

    #[tokio::test]
    async fn test_json_output_is_parseable() {
        let provider = MockProvider::new();
        let response = run(&provider, &parse(&["--json"])).await.unwrap();

        let mut out = Vec::new();
        write_output(&mut out, &response, false).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "success");
    }

    #[tokio::test]
    async fn test_verbose_output_follows_content() {
        let provider = MockProvider::new();
        let response = run(&provider, &parse(&[])).await.unwrap();

        let mut out = Vec::new();
        write_output(&mut out, &response, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], response.content);
        assert_eq!(lines[1], "model: mock-model");
        assert_eq!(lines[2], "stop_reason: end_turn");
    }

    #[tokio::test]
    async fn test_run_with_tools() {
        let provider = MockProvider::new();
        let args = parse(&["--tool", "lookup", "--tool", "fetch"]);
        let response = run(&provider, &args).await.unwrap();
        assert!(response.content.contains("['fetch', 'lookup']"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_echo_tool() {
        let tool = EchoTool {
            name: "lookup".to_string(),
        };
        let output = tool.execute(json!({ "q": 1 })).await.unwrap();
        assert_eq!(output, json!({ "tool": "lookup", "input": { "q": 1 } }));
    }
}
