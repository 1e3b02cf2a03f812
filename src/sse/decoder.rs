//! Frame decoding for the chat response body
//!
//! The body is newline-delimited text. Every line starting with `data: `
//! carries one record payload; blank keep-alive lines, `:` comments and
//! anything else are skipped. Chunk boundaries are arbitrary, so bytes are
//! buffered until a full line is available and only then decoded as UTF-8.

use std::collections::VecDeque;

use futures::stream::{self, Stream, StreamExt};

use crate::traits::{ByteStream, HttpError};

const DATA_PREFIX: &[u8] = b"data: ";

/// Incremental splitter from raw chunks to record payloads.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Bytes of the current, not yet terminated, line
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the payloads of every line it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            if let Some(payload) = extract_payload(&self.buffer[start..end]) {
                payloads.push(payload);
            }
            start = end + 1;
        }
        self.buffer.drain(..start);

        payloads
    }

    /// Number of bytes waiting for a line terminator.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// End of input. An unterminated trailing line is discarded unparsed;
    /// returns how many bytes were dropped.
    pub fn finish(&mut self) -> usize {
        let dropped = self.buffer.len();
        if dropped > 0 {
            tracing::debug!(bytes = dropped, "Discarding unterminated trailing line");
        }
        self.buffer.clear();
        dropped
    }
}

fn extract_payload(line: &[u8]) -> Option<String> {
    let line = line.strip_suffix(b"\r".as_slice()).unwrap_or(line);
    line.strip_prefix(DATA_PREFIX)
        .map(|payload| String::from_utf8_lossy(payload).into_owned())
}

struct FrameState {
    body: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<String>,
    finished: bool,
}

/// Lazily decode a response body into record payloads.
///
/// A transport error is yielded once and ends the sequence.
pub fn frames(body: ByteStream) -> impl Stream<Item = Result<String, HttpError>> + Send {
    let state = FrameState {
        body,
        decoder: FrameDecoder::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(payload) = state.ready.pop_front() {
                return Some((Ok(payload), state));
            }
            if state.finished {
                return None;
            }
            match state.body.next().await {
                Some(Ok(chunk)) => state.ready.extend(state.decoder.feed(&chunk)),
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((Err(err), state));
                }
                None => {
                    state.finished = true;
                    state.decoder.finish();
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn byte_stream(items: Vec<Result<Bytes, HttpError>>) -> ByteStream {
        Box::pin(stream::iter(items))
    }

    #[test]
    fn test_single_chunk_multiple_records() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.feed(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\n");
        assert_eq!(payloads, vec!["{\"a\":1}", "{\"b\":2}"]);
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_record_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: {\"type\":\"to").is_empty());
        assert!(decoder.feed(b"ken\",\"content\":\"hi\"}").is_empty());
        let payloads = decoder.feed(b"\n\n");
        assert_eq!(payloads, vec![r#"{"type":"token","content":"hi"}"#]);
    }

    #[test]
    fn test_every_split_point_yields_same_payloads() {
        let body = "data: {\"type\":\"token\",\"content\":\"héllo ✓\"}\n\n: keep-alive\n\ndata: {\"type\":\"error\"}\n".as_bytes();

        let mut whole = FrameDecoder::new();
        let expected = whole.feed(body);
        assert_eq!(expected.len(), 2);

        for split in 0..=body.len() {
            let mut decoder = FrameDecoder::new();
            let mut payloads = decoder.feed(&body[..split]);
            payloads.extend(decoder.feed(&body[split..]));
            assert_eq!(payloads, expected, "split at byte {}", split);
        }
    }

    #[test]
    fn test_multibyte_character_split() {
        let body = "data: ❌\n".as_bytes();
        // '❌' is three bytes; cut inside it.
        let cut = "data: ".len() + 1;

        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(&body[..cut]).is_empty());
        assert_eq!(decoder.feed(&body[cut..]), vec!["❌"]);
    }

    #[test]
    fn test_crlf_lines() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.feed(b"data: {\"x\":1}\r\n\r\n");
        assert_eq!(payloads, vec!["{\"x\":1}"]);
    }

    #[test]
    fn test_non_data_lines_are_skipped() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.feed(b": ping\nevent: token\nid: 4\n\ndata:nospace\ndata: kept\n");
        assert_eq!(payloads, vec!["kept"]);
    }

    #[test]
    fn test_finish_discards_trailing_partial() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: {\"type\":\"token\"}").is_empty());
        assert_eq!(decoder.finish(), "data: {\"type\":\"token\"}".len());
        assert_eq!(decoder.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_frames_stream() {
        let body = byte_stream(vec![
            Ok(Bytes::from("data: one\n\nda")),
            Ok(Bytes::from("ta: two\n\n")),
            Ok(Bytes::from("data: unterminated")),
        ]);

        let items: Vec<_> = frames(body).collect().await;
        assert_eq!(items, vec![Ok("one".to_string()), Ok("two".to_string())]);
    }

    #[tokio::test]
    async fn test_frames_stream_error_ends_sequence() {
        let body = byte_stream(vec![
            Ok(Bytes::from("data: one\n")),
            Err(HttpError::Io("reset".to_string())),
            Ok(Bytes::from("data: never\n")),
        ]);

        let items: Vec<_> = frames(body).collect().await;
        assert_eq!(
            items,
            vec![
                Ok("one".to_string()),
                Err(HttpError::Io("reset".to_string()))
            ]
        );
    }
}
