//! HTTP client service
//!
//! The transport capability the summarizer is built on. `ReqwestClient` is the
//! production implementation; tests substitute their own `HttpClient`.

use crate::config::HttpConfig;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

/// Response body as a stream of byte chunks
pub type ByteStream = Pin<Box<dyn Stream<Item = AppResult<Bytes>> + Send>>;

/// Outgoing POST request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Absolute URL
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: Vec<u8>,
    /// Whether the body will be consumed as a stream
    pub stream: bool,
}

impl HttpRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response with an unconsumed body
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Body reader
    pub body: ByteStream,
}

impl HttpResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the whole body
    pub async fn bytes(self) -> AppResult<Vec<u8>> {
        let mut body = self.body;
        let mut buf = Vec::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf)
    }

    /// Read the whole body as text, replacing invalid UTF-8
    pub async fn text(self) -> AppResult<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// HTTP transport capability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a POST request and return once response headers are available
    async fn post(&self, request: HttpRequest) -> AppResult<HttpResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    stream_client: Client,
}

impl ReqwestClient {
    /// Create a new client with default timeouts
    pub fn new() -> AppResult<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a new client with the given timeouts
    pub fn with_config(config: &HttpConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("aisummary/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let stream_client = Client::builder()
            .timeout(Duration::from_secs(config.stream_timeout))
            .user_agent(concat!("aisummary/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, stream_client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let client = if request.stream { &self.stream_client } else { &self.client };

        debug!("POST {} (stream: {})", request.url, request.stream);

        let mut builder = client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status().as_u16();

        debug!("Upstream responded with status {}", status);

        let body = response.bytes_stream().map_err(AppError::from);
        Ok(HttpResponse {
            status,
            body: Box::pin(body),
        })
    }
}
