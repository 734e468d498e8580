//! End-to-end checks of the provider contract against the mock backend

use agent_llm::providers::MockProvider;
use agent_llm::providers::mock::MOCK_JSON_RESPONSE;
use agent_llm::tools::{schema, tool_fn};
use agent_llm::{
    CompletionRequest, DEFAULT_MAX_ITERATIONS, LLMError, LLMProvider, Message, StopReason,
    ToolDefinition,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn conversation(text: &str) -> Vec<Message> {
    vec![
        Message::system("ignored by the keyword policy"),
        Message::user("an earlier question"),
        Message::assistant("an earlier answer"),
        Message::user(text),
    ]
}

fn research_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "web_search",
            "Search the web",
            schema::object(json!({ "query": schema::string("Query") }), vec!["query"]),
        ),
        ToolDefinition::new(
            "summarize",
            "Summarize a document",
            schema::object(json!({ "text": schema::string("Text") }), vec!["text"]),
        ),
    ]
}

#[tokio::test]
async fn output_tokens_track_content_length() {
    let provider = MockProvider::new();
    let prompts = ["search", "summarize", "parse", "grade quality", "report", "hi", ""];

    for prompt in prompts {
        let request = CompletionRequest::new(conversation(prompt));
        let response = provider.complete(request).await.unwrap();
        assert_eq!(
            response.usage.output_tokens,
            response.content.chars().count() / 4
        );
    }
}

#[tokio::test]
async fn input_tokens_track_serialized_history() {
    let provider = MockProvider::new();
    let messages = conversation("search");
    let serialized = serde_json::to_string(&messages).unwrap();

    let response = provider
        .complete(CompletionRequest::new(messages))
        .await
        .unwrap();
    assert_eq!(response.usage.input_tokens, serialized.chars().count() / 4);
}

#[tokio::test]
async fn non_ascii_content_is_counted_in_characters() {
    let provider = MockProvider::new().with_default_response("ééééé");

    let response = provider
        .complete(CompletionRequest::new(conversation("hi")))
        .await
        .unwrap();
    assert_eq!(response.content.len(), 10);
    assert_eq!(response.usage.output_tokens, 1);

    let executor = tool_fn(|_, _| Ok(Value::Null));
    let request = CompletionRequest::new(vec![Message::user("ü".repeat(40))]);
    let response = provider
        .complete_with_tools(request, &executor, DEFAULT_MAX_ITERATIONS)
        .await
        .unwrap();
    assert_eq!(
        response.usage.output_tokens,
        response.content.chars().count() / 4
    );
}

#[tokio::test]
async fn json_mode_returns_valid_json() {
    let provider = MockProvider::new();

    for prompt in ["search for crates", "write a report", "anything"] {
        let request = CompletionRequest::builder()
            .messages(conversation(prompt))
            .json_mode(true)
            .build();
        let response = provider.complete(request).await.unwrap();

        assert_eq!(response.content, MOCK_JSON_RESPONSE);
        let parsed: Value = serde_json::from_str(&response.content).unwrap();
        assert_eq!(parsed["mock"], true);
    }
}

#[tokio::test]
async fn response_format_requests_json() {
    let provider = MockProvider::new();
    let request = CompletionRequest::builder()
        .messages(conversation("search"))
        .response_format(json!({ "type": "json_object" }))
        .build();

    let response = provider.complete(request).await.unwrap();
    assert!(serde_json::from_str::<Value>(&response.content).is_ok());
}

#[tokio::test]
async fn override_wins_over_everything() {
    let provider = MockProvider::new().with_default_response("fixed answer");

    for json_mode in [false, true] {
        for prompt in ["search", "evaluate", "nothing in particular"] {
            let request = CompletionRequest::builder()
                .messages(conversation(prompt))
                .system("Summarize")
                .json_mode(json_mode)
                .build();
            let response = provider.complete(request).await.unwrap();
            assert_eq!(response.content, "fixed answer");
        }
    }
}

#[tokio::test]
async fn search_outranks_summary() {
    let provider = MockProvider::new();
    let request = CompletionRequest::builder()
        .messages(conversation("Summarize what you find"))
        .system("You search the web")
        .build();

    let response = provider.complete(request).await.unwrap();
    assert!(response.content.starts_with("[Mock] Search results"));
    assert!(!response.content.contains("Summary"));
}

#[tokio::test]
async fn only_the_latest_user_message_is_classified() {
    let provider = MockProvider::new();
    let messages = vec![
        Message::user("search everything"),
        Message::assistant("done"),
        Message::user("now evaluate it"),
    ];

    let response = provider
        .complete(CompletionRequest::new(messages))
        .await
        .unwrap();
    assert!(response.content.starts_with("[Mock] Evaluation"));
}

#[tokio::test]
async fn call_counter_counts_and_resets() {
    let provider = MockProvider::new();
    let tools = research_tools();
    let executor = tool_fn(|_, _| Ok(Value::Null));

    for _ in 0..3 {
        provider
            .complete(CompletionRequest::new(conversation("hi")))
            .await
            .unwrap();
    }
    for _ in 0..2 {
        let request = CompletionRequest::builder()
            .messages(conversation("hi"))
            .tools(tools.clone())
            .build();
        provider
            .complete_with_tools(request, &executor, DEFAULT_MAX_ITERATIONS)
            .await
            .unwrap();
    }
    assert_eq!(provider.call_count(), 5);

    provider.reset();
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn mock_tool_loop_names_both_tools_in_one_call() {
    let provider = MockProvider::new();
    let executed = AtomicUsize::new(0);
    let executor = tool_fn(|_, _| {
        executed.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    });

    let request = CompletionRequest::builder()
        .messages(conversation("Research Rust async runtimes"))
        .tools(research_tools())
        .build();
    let response = provider
        .complete_with_tools(request, &executor, 10)
        .await
        .unwrap();

    assert!(response.content.contains("web_search"));
    assert!(response.content.contains("summarize"));
    assert!(response.content.contains("Research Rust async runtimes"));
    assert_eq!(response.stop_reason, StopReason::EndTurn);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(executed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn classified_content_is_repeatable() {
    let provider = MockProvider::new();
    let request = CompletionRequest::new(conversation("extract the keywords"));

    let first = provider.complete(request.clone()).await.unwrap();
    let second = provider.complete(request).await.unwrap();

    assert_eq!(first.content, second.content);
    assert_eq!(first.usage.output_tokens, second.usage.output_tokens);
}

#[tokio::test]
async fn fallback_content_changes_with_call_count() {
    let provider = MockProvider::new();
    let request = CompletionRequest::new(conversation("hello there"));

    let first = provider.complete(request.clone()).await.unwrap();
    let second = provider.complete(request).await.unwrap();

    assert!(first.content.contains("(call #1)"));
    assert!(second.content.contains("(call #2)"));
    assert_ne!(first.content, second.content);
}

#[tokio::test]
async fn mock_degrades_gracefully_on_empty_history() {
    let provider = MockProvider::new();

    let response = provider
        .complete(CompletionRequest::builder().build())
        .await
        .unwrap();
    assert!(response.content.starts_with("[Mock] Processed request"));

    let executor = tool_fn(|_, _| Ok(Value::Null));
    let response = provider
        .complete_with_tools(CompletionRequest::builder().build(), &executor, 0)
        .await
        .unwrap();
    assert_eq!(
        response.content,
        "[Mock] Processed with tools: []. Context: ..."
    );
}

#[tokio::test]
async fn counter_is_exact_under_concurrency() {
    let provider = Arc::new(MockProvider::new());

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                provider
                    .complete(CompletionRequest::new(vec![Message::user("search")]))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(provider.call_count(), 32);
}

#[tokio::test]
async fn callers_can_hold_a_trait_object() {
    let provider: Arc<dyn LLMProvider> = Arc::new(MockProvider::new().with_model("graph-model"));

    let response = provider
        .complete(CompletionRequest::new(conversation("write it")))
        .await
        .unwrap();
    assert_eq!(response.model, "graph-model");
    assert_eq!(provider.name(), "mock");
}

#[test]
fn iteration_bound_error_is_reportable() {
    let err = LLMError::IterationBoundExceeded {
        max_iterations: DEFAULT_MAX_ITERATIONS,
    };
    assert!(err.to_string().contains("10 iterations"));
}
