//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::models::openai::{ChatMessage, ChatRequest};

/// Set to true to include full message contents in debug logs
/// Default is false to reduce log verbosity
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, total - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered version of a chat message for logging
fn filter_message(msg: &ChatMessage) -> serde_json::Value {
    // For system messages, truncate more aggressively
    let max_len = if msg.role == "system" { 100 } else { 200 };
    let content = if VERBOSE_REQUEST_LOGGING {
        msg.content.clone()
    } else {
        truncate_content(&msg.content, max_len)
    };

    serde_json::json!({
        "role": msg.role,
        "content": content,
    })
}

/// Create a filtered summary of a chat request for logging
/// Keeps original structure but truncates verbose content
pub fn create_request_log_summary(request: &ChatRequest) -> serde_json::Value {
    let filtered_messages: Vec<serde_json::Value> =
        request.messages.iter().map(filter_message).collect();

    serde_json::json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "stream": request.stream,
        "messages": filtered_messages,
    })
}
