//! Non-streaming summarization tests

mod common;

use aisummary::config::schema::{DEFAULT_DOMAIN, DEFAULT_SUMMARY_PROMPT};
use aisummary::{AppError, Language, MemoryStore, OpenAISummarizer};
use common::{FakeHttp, Reply};
use serde_json::json;
use std::sync::Arc;

fn store_with_key() -> Arc<MemoryStore> {
    Arc::new([("openai_apikey", "sk-test")].into_iter().collect())
}

fn completion(content: &str) -> Reply {
    Reply::json(
        200,
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }]
        }),
    )
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() {
    for store in [
        MemoryStore::new(),
        [("openai_apikey", "")].into_iter().collect(),
    ] {
        let http = FakeHttp::with_reply(completion("unused"));
        let summarizer = OpenAISummarizer::new(http.clone(), Arc::new(store));

        let mut updates = Vec::new();
        let err = summarizer
            .summarize("text", Language::English, Language::English, |t| updates.push(t.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingCredential(_)));
        assert_eq!(http.calls(), 0);
        assert!(updates.is_empty());
    }
}

#[tokio::test]
async fn test_request_contract() {
    let http = FakeHttp::with_reply(completion("ok"));
    let summarizer = OpenAISummarizer::new(http.clone(), store_with_key());

    summarizer
        .summarize("Long article", Language::English, Language::Japanese, |_| {})
        .await
        .unwrap();

    let request = http.last_request();
    assert_eq!(request.url, format!("https://{}/v1/chat/completions", DEFAULT_DOMAIN));
    assert_eq!(request.header("Authorization"), Some("Bearer sk-test"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert!(!request.stream);

    let body = http.last_body();
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["top_p"], 1.0);
    assert_eq!(body["frequency_penalty"], 1.0);
    assert_eq!(body["presence_penalty"], 1.0);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0], json!({ "role": "system", "content": DEFAULT_SUMMARY_PROMPT }));
    assert_eq!(
        body["messages"][1],
        json!({ "role": "user", "content": "Summarize in Japanese:\n\"\"\"\nLong article\n\"\"\"" })
    );
}

#[tokio::test]
async fn test_custom_domain_and_prompt() {
    let store = store_with_key();
    store.set("openai_domain", "proxy.example.com");
    store.set("openai_summary_prompt", "Summarize tersely.");

    let http = FakeHttp::with_reply(completion("ok"));
    let summarizer = OpenAISummarizer::new(http.clone(), store);
    summarizer
        .summarize("x", Language::English, Language::German, |_| {})
        .await
        .unwrap();

    assert_eq!(http.last_request().url, "https://proxy.example.com/v1/chat/completions");
    assert_eq!(http.last_body()["messages"][0]["content"], "Summarize tersely.");
}

#[tokio::test]
async fn test_config_read_on_every_call() {
    let store = store_with_key();
    let summarizer_http = FakeHttp::with_reply(completion("first"));
    let summarizer = OpenAISummarizer::new(summarizer_http.clone(), store.clone());
    summarizer
        .summarize("x", Language::English, Language::English, |_| {})
        .await
        .unwrap();

    store.remove("openai_apikey");
    let err = summarizer
        .summarize("x", Language::English, Language::English, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MissingCredential(_)));
    assert_eq!(summarizer_http.calls(), 1);
}

#[tokio::test]
async fn test_plain_output_trimmed() {
    let http = FakeHttp::with_reply(completion("  A short summary.\n"));
    let summarizer = OpenAISummarizer::new(http, store_with_key());

    let mut updates = Vec::new();
    let result = summarizer
        .summarize("x", Language::English, Language::English, |t| updates.push(t.to_string()))
        .await
        .unwrap();

    assert_eq!(result, "A short summary.");
    assert_eq!(updates, vec!["A short summary."]);
}

#[tokio::test]
async fn test_one_quote_pair_stripped() {
    let http = FakeHttp::with_reply(completion("\"\"Quoted twice\"\""));
    let summarizer = OpenAISummarizer::new(http, store_with_key());

    let result = summarizer
        .summarize("x", Language::English, Language::English, |_| {})
        .await
        .unwrap();

    assert_eq!(result, "\"Quoted twice\"");
}

#[tokio::test]
async fn test_http_error_status() {
    let http = FakeHttp::with_reply(Reply::json(401, json!({ "error": { "message": "Incorrect API key" } })));
    let summarizer = OpenAISummarizer::new(http, store_with_key());

    let mut updates = 0;
    let err = summarizer
        .summarize("x", Language::English, Language::English, |_| updates += 1)
        .await
        .unwrap_err();

    match err {
        AppError::Http { status, response } => {
            assert_eq!(status, 401);
            assert!(response.contains("Incorrect API key"));
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
    assert_eq!(updates, 0);
}

#[tokio::test]
async fn test_http_error_survives_unreadable_body() {
    let http = FakeHttp::with_reply(Reply {
        status: 503,
        chunks: vec![Err(AppError::MalformedResponse("connection reset".to_string()))],
    });
    let summarizer = OpenAISummarizer::new(http.clone(), store_with_key());

    let err = summarizer
        .summarize("x", Language::English, Language::English, |_| {})
        .await
        .unwrap_err();

    // the status error is still reported, with an empty body
    match err {
        AppError::Http { status, response } => {
            assert_eq!(status, 503);
            let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
            assert_eq!(parsed["body"], "");
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
    assert_eq!(http.released(), 1);
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let http = FakeHttp::with_reply(Reply::json(200, json!({ "id": "x", "choices": [] })));
    let summarizer = OpenAISummarizer::new(http, store_with_key());

    let mut updates = 0;
    let err = summarizer
        .summarize("x", Language::English, Language::English, |_| updates += 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(raw) if raw.contains("choices")));
    assert_eq!(updates, 0);
}

#[tokio::test]
async fn test_missing_choices_carries_raw_payload() {
    let http = FakeHttp::with_reply(Reply::json(200, json!({ "unexpected": true })));
    let summarizer = OpenAISummarizer::new(http, store_with_key());

    let err = summarizer
        .summarize("x", Language::English, Language::English, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(raw) if raw.contains("unexpected")));
}
