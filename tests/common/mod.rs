//! Shared test fakes

#![allow(dead_code)]

use aisummary::services::{ByteStream, HttpClient, HttpRequest, HttpResponse};
use aisummary::views::HostCommands;
use aisummary::{AppError, AppResult};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio_stream::Stream;

/// Body stream that counts how many times it was dropped
pub struct TrackedBody {
    chunks: std::vec::IntoIter<AppResult<Bytes>>,
    released: Arc<AtomicUsize>,
}

impl Stream for TrackedBody {
    type Item = AppResult<Bytes>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().chunks.next())
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted response
pub struct Reply {
    pub status: u16,
    pub chunks: Vec<AppResult<Bytes>>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            chunks: vec![Ok(Bytes::from(body.to_string()))],
        }
    }

    pub fn chunks(chunks: Vec<String>) -> Self {
        Self {
            status: 200,
            chunks: chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect(),
        }
    }
}

/// Fake transport returning one scripted reply per call
#[derive(Default)]
pub struct FakeHttp {
    replies: Mutex<Vec<Reply>>,
    pub requests: Mutex<Vec<HttpRequest>>,
    pub released: Arc<AtomicUsize>,
}

impl FakeHttp {
    pub fn with_reply(reply: Reply) -> Arc<Self> {
        let fake = FakeHttp::default();
        fake.replies.lock().unwrap().push(reply);
        Arc::new(fake)
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }

    pub fn last_body(&self) -> Value {
        serde_json::from_slice(&self.last_request().body).unwrap()
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn post(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().remove(0);
        let body: ByteStream = Box::pin(TrackedBody {
            chunks: reply.chunks.into_iter(),
            released: self.released.clone(),
        });
        Ok(HttpResponse {
            status: reply.status,
            body,
        })
    }
}

/// Fake host recording invocations
#[derive(Default)]
pub struct FakeHost {
    pub calls: Mutex<Vec<(String, Value)>>,
    pub fail: bool,
}

impl FakeHost {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostCommands for FakeHost {
    async fn invoke(&self, command: &str, args: Value) -> AppResult<Value> {
        self.calls.lock().unwrap().push((command.to_string(), args));
        if self.fail {
            return Err(AppError::HostCommand("registration refused".to_string()));
        }
        Ok(Value::Null)
    }
}

pub fn delta_frame(content: &str) -> String {
    format!(
        "data: {}",
        serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
    )
}
