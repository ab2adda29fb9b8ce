//! Server-sent event frame decoding
//!
//! The upstream body is a sequence of `data: ` prefixed frames, each either a
//! JSON chunk or the `[DONE]` marker. Network chunk boundaries do not line up
//! with frames, so the decoder carries over an unfinished UTF-8 sequence and
//! an unterminated trailing frame until more bytes arrive.

use crate::models::openai::ChatChunk;
use crate::utils::error::{helpers, AppError, AppResult};

/// Frame delimiter
pub const FRAME_DELIMITER: &str = "data: ";

/// End-of-stream marker
pub const DONE_MARKER: &str = "[DONE]";

/// A decoded frame
#[derive(Debug, Clone)]
pub enum Frame {
    /// JSON chunk
    Chunk(ChatChunk),
    /// `[DONE]` marker
    Done,
}

/// Incremental frame decoder
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence
    utf8_tail: Vec<u8>,
    /// Text after the last delimiter not yet known to be a whole frame
    pending: String,
}

/// Parse one frame, `None` for blank frames
fn parse_frame(raw: &str) -> AppResult<Option<Frame>> {
    let data = raw.trim();
    if data.is_empty() {
        return Ok(None);
    }
    if data == DONE_MARKER {
        return Ok(Some(Frame::Done));
    }

    let chunk = serde_json::from_str::<ChatChunk>(data).map_err(|source| AppError::StreamParse {
        frame: data.to_string(),
        source,
    })?;

    // a chunk must carry at least one choice; in-band error objects land here
    if chunk.first_choice().is_none() {
        return Err(helpers::malformed_response_error(data));
    }

    Ok(Some(Frame::Chunk(chunk)))
}

impl FrameDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk
    ///
    /// Returns the frames completed by this chunk. An `Err` entry is always the
    /// last one: frames decoded before the failure are still delivered.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<AppResult<Frame>> {
        match self.decode_utf8(chunk) {
            Ok(text) => {
                self.pending.push_str(&text);
                self.drain(false)
            }
            Err(e) => vec![Err(e)],
        }
    }

    /// Flush at end of body
    pub fn finish(&mut self) -> Vec<AppResult<Frame>> {
        if !self.utf8_tail.is_empty() {
            self.utf8_tail.clear();
            return vec![Err(helpers::malformed_response_error(
                "Stream ended inside a UTF-8 sequence",
            ))];
        }
        self.drain(true)
    }

    /// Whether text is buffered waiting for the rest of its frame
    pub fn has_pending(&self) -> bool {
        !self.pending.trim().is_empty() || !self.utf8_tail.is_empty()
    }

    fn decode_utf8(&mut self, chunk: &[u8]) -> AppResult<String> {
        self.utf8_tail.extend_from_slice(chunk);

        let valid = match std::str::from_utf8(&self.utf8_tail) {
            Ok(_) => self.utf8_tail.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                return Err(helpers::malformed_response_error(format!(
                    "Invalid UTF-8 in stream: {}",
                    e
                )))
            }
        };

        let tail = self.utf8_tail.split_off(valid);
        let complete = std::mem::replace(&mut self.utf8_tail, tail);
        String::from_utf8(complete)
            .map_err(|e| helpers::malformed_response_error(format!("Invalid UTF-8 in stream: {}", e)))
    }

    fn drain(&mut self, eof: bool) -> Vec<AppResult<Frame>> {
        let buffered = std::mem::take(&mut self.pending);
        let mut pieces: Vec<&str> = buffered.split(FRAME_DELIMITER).collect();
        let last = pieces.pop().unwrap_or_default();

        let mut frames = Vec::new();
        for piece in pieces {
            match parse_frame(piece) {
                Ok(Some(frame)) => {
                    let done = matches!(frame, Frame::Done);
                    frames.push(Ok(frame));
                    if done {
                        return frames;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    frames.push(Err(e));
                    return frames;
                }
            }
        }

        // A trailing piece is complete once terminated by a newline or at end of
        // body; otherwise it is taken only if it already parses
        let terminated = eof || last.ends_with('\n');
        match parse_frame(last) {
            Ok(Some(frame)) => frames.push(Ok(frame)),
            Ok(None) => {}
            Err(e) if terminated => frames.push(Err(e)),
            Err(_) => self.pending = last.to_string(),
        }

        frames
    }
}
