//! OpenAI summarization service
//!
//! Summarizes text into a target language through an OpenAI-compatible chat
//! completion endpoint, streamed or in a single response depending on the
//! `openai_stream` setting.

use super::http::{HttpClient, HttpRequest};
use super::stream::SummaryStream;
use crate::config::schema::{ConfigKey, SummaryConfig, DEFAULT_SUMMARY_PROMPT};
use crate::config::ConfigStore;
use crate::models::openai::{ChatMessage, ChatRequest, ChatResponse};
use crate::models::{ConfigField, Language, ServiceInfo};
use crate::utils::error::{helpers, AppResult};
use crate::utils::logging::create_request_log_summary;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

static INFO: Lazy<ServiceInfo> = Lazy::new(|| ServiceInfo {
    name: "OpenAI 总结",
    support_language: Language::ALL
        .iter()
        .map(|lang| (lang.code(), lang.display_name()))
        .collect(),
    needs: vec![ConfigField::new(
        ConfigKey::OpenAISummaryPrompt,
        DEFAULT_SUMMARY_PROMPT,
        "自定义Prompt",
    )],
});

/// Strip one leading and one trailing double quote
pub fn unquote(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

/// User instruction wrapping the text to summarize
pub fn user_prompt(text: &str, to: Language) -> String {
    format!("Summarize in {}:\n\"\"\"\n{}\n\"\"\"", to.display_name(), text)
}

/// Build the chat completion payload
pub fn build_request(config: &SummaryConfig, text: &str, to: Language) -> ChatRequest {
    ChatRequest {
        stream: config.stream,
        messages: vec![
            ChatMessage::system(config.prompt.clone()),
            ChatMessage::user(user_prompt(text, to)),
        ],
        ..Default::default()
    }
}

/// Summarization adapter
#[derive(Clone)]
pub struct OpenAISummarizer {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn ConfigStore>,
}

impl OpenAISummarizer {
    /// Create a summarizer over a transport and a configuration store
    pub fn new(http: Arc<dyn HttpClient>, store: Arc<dyn ConfigStore>) -> Self {
        Self { http, store }
    }

    /// Capability descriptor
    pub fn info() -> &'static ServiceInfo {
        &INFO
    }

    /// Summarize, calling `on_update` with the cumulative text after each delta
    ///
    /// Returns the final summary. In non-streaming mode `on_update` is called
    /// exactly once.
    pub async fn summarize<F>(
        &self,
        text: &str,
        from: Language,
        to: Language,
        mut on_update: F,
    ) -> AppResult<String>
    where
        F: FnMut(&str),
    {
        let mut stream = self.summarize_deltas(text, from, to).await?;
        let mut target = String::new();

        while let Some(delta) = stream.next().await {
            target.push_str(&delta?);
            on_update(&target);
        }

        Ok(target)
    }

    /// Summarize as a lazy stream of deltas
    ///
    /// Configuration is read from the store on every call. Fails before any
    /// network call when no API key is configured, and before any body is read
    /// when the upstream status is not 2xx.
    pub async fn summarize_deltas(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> AppResult<SummaryStream> {
        let span = info_span!("summarize", call_id = %Uuid::new_v4().simple(), %from, %to);
        self.send(text, to).instrument(span).await
    }

    async fn send(&self, text: &str, to: Language) -> AppResult<SummaryStream> {
        let config = SummaryConfig::load(self.store.as_ref())?;
        let request = build_request(&config, text, to);

        debug!("Summary request: {}", create_request_log_summary(&request));

        let http_request = HttpRequest {
            url: config.endpoint(),
            headers: request_headers(&config),
            body: serde_json::to_vec(&request)?,
            stream: config.stream,
        };

        debug!("Stream state: Idle -> Connecting");
        let response = self.http.post(http_request).await?;

        if !response.is_success() {
            let status = response.status;
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read error response body: {}", e);
                    String::new()
                }
            };
            error!("Summary request failed: {} - {}", status, body);
            return Err(helpers::http_error(status, &body));
        }

        if config.stream {
            info!("Streaming summary from {}", config.domain);
            return Ok(SummaryStream::from_body(response.body));
        }

        let raw = response.bytes().await?;
        let target = parse_completion(&raw)?;
        info!("Summary completed ({} chars)", target.chars().count());
        Ok(SummaryStream::once(target))
    }
}

fn request_headers(config: &SummaryConfig) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), format!("Bearer {}", config.api_key)),
    ];
    if config.stream {
        headers.push(("Accept".to_string(), "text/event-stream".to_string()));
    }
    headers
}

/// Extract the summary from a non-streaming response body
fn parse_completion(raw: &[u8]) -> AppResult<String> {
    let raw_text = || String::from_utf8_lossy(raw).into_owned();

    let value: serde_json::Value = serde_json::from_slice(raw)
        .map_err(|_| helpers::malformed_response_error(raw_text()))?;
    let response: ChatResponse = serde_json::from_value(value.clone())
        .map_err(|_| helpers::malformed_response_error(value.to_string()))?;

    let choices = match response.choices.as_deref() {
        Some(choices) if !choices.is_empty() => choices,
        _ => return Err(helpers::malformed_response_error(value.to_string())),
    };

    let content = response.first_content().map(str::trim).unwrap_or_default();
    if content.is_empty() {
        let choices = serde_json::to_string(choices)?;
        return Err(helpers::malformed_response_error(choices));
    }

    Ok(unquote(content).to_string())
}

impl std::fmt::Debug for OpenAISummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAISummarizer").finish_non_exhaustive()
    }
}
