//! Service layer module
//!
//! Contains the HTTP transport, SSE frame decoding, and the summarization adapter

pub mod http;
pub mod sse;
pub mod stream;
pub mod summarizer;

pub use http::{ByteStream, HttpClient, HttpRequest, HttpResponse, ReqwestClient};
pub use stream::{StreamState, SummaryStream};
pub use summarizer::OpenAISummarizer;
