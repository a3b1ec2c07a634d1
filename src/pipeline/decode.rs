//! Streaming decoder (Bytes -> Patch)
//!
//! Best-effort and loss-tolerant: blank lines, `//` comment lines and lines
//! that are not valid patch JSON are skipped, never reported as errors.

use crate::pipeline::Decoder;
use crate::types::Patch;
use crate::{BoxStream, PipeResult};
use bytes::Bytes;
use futures::{stream, StreamExt};
use std::collections::VecDeque;
use tracing::debug;

/// Lines starting with this prefix are ignored.
pub const COMMENT_PREFIX: &str = "//";

/// Parse one protocol line. Returns `None` for anything that should be skipped.
pub fn parse_patch_line(line: &str) -> Option<Patch> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return None;
    }
    match serde_json::from_str::<Patch>(trimmed) {
        Ok(patch) => Some(patch),
        Err(e) => {
            debug!(error = %e, line = trimmed, "skipping malformed patch line");
            None
        }
    }
}

/// Incremental line splitter.
///
/// Buffers raw bytes rather than text so a multi-byte character split across
/// two chunks is decoded intact. `\n` never occurs inside a UTF-8 sequence,
/// so splitting on it at the byte level is safe.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the patches completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Patch> {
        self.buf.extend_from_slice(chunk);

        let mut patches = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.buf[start..].iter().position(|&b| b == b'\n') {
            let end = start + pos;
            let line = String::from_utf8_lossy(&self.buf[start..end]);
            if let Some(patch) = parse_patch_line(&line) {
                patches.push(patch);
            }
            start = end + 1;
        }
        self.buf.drain(..start);
        patches
    }

    /// Parse whatever is left once the stream has ended.
    pub fn flush(&mut self) -> Option<Patch> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        parse_patch_line(&String::from_utf8_lossy(&rest))
    }

    pub fn finish(mut self) -> Option<Patch> {
        self.flush()
    }

    /// Bytes of the trailing partial line still waiting for a newline.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// Line-delimited patch decoder for the generation stream body.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatchLineDecoder;

#[async_trait::async_trait]
impl Decoder for PatchLineDecoder {
    async fn decode_stream(
        &self,
        input: BoxStream<'static, Bytes>,
    ) -> PipeResult<BoxStream<'static, Patch>> {
        let stream = stream::unfold(
            (input, LineBuffer::new(), VecDeque::new(), false),
            move |(mut input, mut buf, mut pending, mut eof)| async move {
                loop {
                    if let Some(patch) = pending.pop_front() {
                        return Some((Ok(patch), (input, buf, pending, eof)));
                    }
                    if eof {
                        return None;
                    }

                    match input.next().await {
                        Some(Ok(bytes)) => {
                            pending.extend(buf.push(&bytes));
                            continue;
                        }
                        // Transport errors pass through; the caller decides what a failure means.
                        Some(Err(e)) => return Some((Err(e), (input, buf, pending, eof))),
                        None => {
                            eof = true;
                            pending.extend(buf.flush());
                            continue;
                        }
                    }
                }
            },
        );

        Ok(Box::pin(stream))
    }
}
