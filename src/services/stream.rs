//! Summary delta stream
//!
//! A finite, non-restartable stream of summary fragments. In streaming mode it
//! pulls the upstream body through a `FrameDecoder`; in non-streaming mode it
//! carries the single final text. The body reader is dropped as soon as the
//! stream reaches `Done` or `Failed`, and with the stream otherwise.

use super::http::ByteStream;
use super::sse::{Frame, FrameDecoder};
use crate::utils::error::{AppError, AppResult};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_stream::Stream;
use tracing::{debug, warn};

/// State of a summary stream
///
/// A stream exists only once response headers have arrived, so it starts at
/// `Streaming`. The earlier `Idle` and `Connecting` phases of a call are traced
/// in debug logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Reading the body
    Streaming,
    /// Completed normally
    Done,
    /// Terminated by an error or cancellation
    Failed,
}

/// Stream of summary deltas
pub struct SummaryStream {
    body: Option<ByteStream>,
    decoder: FrameDecoder,
    ready: VecDeque<String>,
    error: Option<AppError>,
    state: StreamState,
}

impl SummaryStream {
    /// Stream over an upstream SSE body
    pub(crate) fn from_body(body: ByteStream) -> Self {
        debug!("Stream state: Connecting -> Streaming");
        Self {
            body: Some(body),
            decoder: FrameDecoder::new(),
            ready: VecDeque::new(),
            error: None,
            state: StreamState::Streaming,
        }
    }

    /// Stream yielding one complete text
    pub(crate) fn once(text: String) -> Self {
        Self {
            body: None,
            decoder: FrameDecoder::new(),
            ready: VecDeque::from([text]),
            error: None,
            state: StreamState::Done,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Stop reading and release the body
    pub fn cancel(mut self) {
        if self.body.is_some() {
            warn!("Summary stream cancelled by caller");
            self.release(StreamState::Failed);
        }
    }

    fn release(&mut self, state: StreamState) {
        if self.body.take().is_some() {
            debug!("Stream state: Streaming -> {:?}, body reader released", state);
        }
        self.state = state;
    }

    fn absorb(&mut self, frames: Vec<AppResult<Frame>>) {
        for frame in frames {
            match frame {
                Ok(Frame::Chunk(chunk)) => {
                    if let Some(content) = chunk.delta_content() {
                        self.ready.push_back(content.to_string());
                    }
                }
                Ok(Frame::Done) => {
                    debug!("Received streaming response end marker");
                    self.release(StreamState::Done);
                    return;
                }
                Err(e) => {
                    self.error = Some(e);
                    self.release(StreamState::Failed);
                    return;
                }
            }
        }
    }
}

impl Stream for SummaryStream {
    type Item = AppResult<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(delta) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(delta)));
            }
            if let Some(e) = this.error.take() {
                return Poll::Ready(Some(Err(e)));
            }

            let Some(body) = this.body.as_mut() else {
                return Poll::Ready(None);
            };

            match body.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(bytes))) => {
                    let frames = this.decoder.push(&bytes);
                    this.absorb(frames);
                }
                Poll::Ready(Some(Err(e))) => {
                    this.error = Some(e);
                    this.release(StreamState::Failed);
                }
                Poll::Ready(None) => {
                    let frames = this.decoder.finish();
                    this.absorb(frames);
                    if this.body.is_some() {
                        this.release(StreamState::Done);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for SummaryStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryStream")
            .field("state", &self.state)
            .field("ready", &self.ready.len())
            .finish_non_exhaustive()
    }
}
