//! Response framing for the unframed JSON listener protocol.
//!
//! The editor writes exactly one JSON value per command and nothing marks its
//! end. Whenever the accumulated bytes end in a closing `}` or `]` they are
//! parsed speculatively; the first successful parse completes the response. If the peer closes first,
//! one final parse is attempted and its failure is reported.
//!
//! This is only sound for object and array roots, whose valid prefixes are
//! never themselves complete values. Scalar roots could complete early.

use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::error::EngineError;

/// A complete response value.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub value: Value,
    /// Non-whitespace bytes received after the value. Non-zero means the
    /// peer pipelined more data than one response.
    pub trailing_bytes: usize,
}

/// Accumulates response bytes until they form one JSON value.
#[derive(Debug)]
pub struct ResponseFramer {
    buf: Vec<u8>,
    max_bytes: usize,
}

impl ResponseFramer {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_bytes,
        }
    }

    /// Bytes buffered so far.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Append a chunk and try to parse everything received so far.
    ///
    /// `Ok(None)` means the buffer is not (yet) valid JSON. That covers
    /// truncated values, multi-byte characters split across chunks, and
    /// plain garbage alike; only the final parse in [`finish`](Self::finish)
    /// tells them apart.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Option<Frame>, EngineError> {
        if self.buf.len() + chunk.len() > self.max_bytes {
            return Err(EngineError::ResponseTooLarge {
                limit: self.max_bytes,
            });
        }
        self.buf.extend_from_slice(chunk);

        if !self.ends_with_closer() {
            return Ok(None);
        }
        match self.parse() {
            Ok(frame) => Ok(Some(frame)),
            Err(e) => {
                trace!(buffered = self.buf.len(), error = %e, "response incomplete");
                Ok(None)
            }
        }
    }

    /// Final parse after the peer closed the connection.
    pub fn finish(self) -> Result<Frame, EngineError> {
        if self.buf.iter().all(u8::is_ascii_whitespace) {
            return Err(EngineError::Decode(
                "connection closed before any response data".into(),
            ));
        }
        self.parse()
    }

    /// An object or array can only be complete once its closer has arrived.
    fn ends_with_closer(&self) -> bool {
        matches!(
            self.buf.iter().rev().find(|b| !b.is_ascii_whitespace()),
            Some(b'}' | b']')
        )
    }

    fn parse(&self) -> Result<Frame, EngineError> {
        let mut values = serde_json::Deserializer::from_slice(&self.buf).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) => {
                let consumed = values.byte_offset();
                let trailing_bytes = self.buf[consumed..]
                    .iter()
                    .filter(|b| !b.is_ascii_whitespace())
                    .count();
                Ok(Frame {
                    value,
                    trailing_bytes,
                })
            }
            Some(Err(e)) => Err(EngineError::Decode(e.to_string())),
            None => Err(EngineError::Decode("empty response".into())),
        }
    }
}

/// Read one framed response from `reader`.
///
/// Each individual read is bounded by `read_timeout` when set; the response
/// as a whole is bounded by `max_bytes`.
pub async fn read_response<R>(
    reader: &mut R,
    chunk_size: usize,
    max_bytes: usize,
    read_timeout: Option<Duration>,
) -> Result<Frame, EngineError>
where
    R: AsyncRead + Unpin,
{
    let mut framer = ResponseFramer::new(max_bytes);
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut reads = 0usize;

    loop {
        let n = match read_timeout {
            Some(limit) => tokio::time::timeout(limit, reader.read(&mut chunk))
                .await
                .map_err(|_| EngineError::ReadTimeout(limit))??,
            None => reader.read(&mut chunk).await?,
        };

        if n == 0 {
            debug!(buffered = framer.buffered(), reads, "peer closed, final parse");
            return framer.finish();
        }
        reads += 1;

        if let Some(frame) = framer.push(&chunk[..n])? {
            debug!(bytes = framer.buffered(), reads, "response complete");
            return Ok(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LIMIT: usize = 1024;

    #[test]
    fn test_single_chunk_object() {
        let mut framer = ResponseFramer::new(LIMIT);
        let frame = framer
            .push(br#"{"status":"success","result":{"node_id":"ABC"}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(frame.value["result"]["node_id"], "ABC");
        assert_eq!(frame.trailing_bytes, 0);
    }

    #[test]
    fn test_multi_chunk_object_waits_for_completion() {
        let payload = br#"{"status":"success","result":{"pins":[{"name":"then"},{"name":"execute"}]}}"#;
        let mut framer = ResponseFramer::new(LIMIT);

        let mut completed = None;
        for (i, chunk) in payload.chunks(7).enumerate() {
            let last = (i + 1) * 7 >= payload.len();
            let result = framer.push(chunk).unwrap();
            if last {
                completed = result;
            } else {
                assert!(result.is_none(), "returned early after chunk {i}");
            }
        }
        let frame = completed.expect("complete after final chunk");
        assert_eq!(frame.value["result"]["pins"][1]["name"], "execute");
    }

    #[test]
    fn test_split_utf8_sequence_is_incomplete_not_fatal() {
        let payload = "{\"message\":\"Grüße\"}".as_bytes();
        let split = payload.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let mut framer = ResponseFramer::new(LIMIT);
        assert!(framer.push(&payload[..split]).unwrap().is_none());
        let frame = framer.push(&payload[split..]).unwrap().unwrap();
        assert_eq!(frame.value["message"], "Grüße");
    }

    #[test]
    fn test_trailing_whitespace_parses_identically() {
        let mut framer = ResponseFramer::new(LIMIT);
        let frame = framer.push(b"{\"success\":true}\r\n  ").unwrap().unwrap();
        assert_eq!(frame.value, json!({"success": true}));
        assert_eq!(frame.trailing_bytes, 0);
    }

    #[test]
    fn test_pipelined_values_report_trailing_bytes() {
        let mut framer = ResponseFramer::new(LIMIT);
        let frame = framer.push(br#"{"a":1}{"b":2}"#).unwrap().unwrap();
        assert_eq!(frame.value, json!({"a": 1}));
        assert_eq!(frame.trailing_bytes, 7);
    }

    #[test]
    fn test_malformed_json_fails_only_at_close() {
        let mut framer = ResponseFramer::new(LIMIT);
        assert!(framer.push(b"{\"status\": success}").unwrap().is_none());
        assert!(framer.push(b" more").unwrap().is_none());
        assert!(matches!(framer.finish(), Err(EngineError::Decode(_))));
    }

    #[test]
    fn test_close_without_data_is_decode_failure() {
        let framer = ResponseFramer::new(LIMIT);
        let err = framer.finish().unwrap_err();
        assert!(
            matches!(&err, EngineError::Decode(msg) if msg == "connection closed before any response data"),
            "unexpected error: {err}"
        );

        let mut framer = ResponseFramer::new(LIMIT);
        assert!(framer.push(b" \r\n").unwrap().is_none());
        let err = framer.finish().unwrap_err();
        assert!(
            matches!(&err, EngineError::Decode(msg) if msg == "connection closed before any response data"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_parse_waits_for_closing_bracket() {
        let mut framer = ResponseFramer::new(LIMIT);
        assert!(!framer.ends_with_closer());
        assert!(framer.push(br#"{"result":{"nodes":["#).unwrap().is_none());
        assert!(!framer.ends_with_closer());
        assert!(framer.push(br#""A","B""#).unwrap().is_none());
        assert!(!framer.ends_with_closer());

        // A closer alone is not enough; the value must also be complete.
        assert!(framer.push(b"]}").unwrap().is_none());
        assert!(framer.ends_with_closer());

        let frame = framer.push(b"}\n").unwrap().unwrap();
        assert_eq!(frame.value, json!({"result": {"nodes": ["A", "B"]}}));
        assert_eq!(frame.trailing_bytes, 0);
    }

    #[test]
    fn test_array_root_frames() {
        let mut framer = ResponseFramer::new(LIMIT);
        assert!(framer.push(b"[1, 2").unwrap().is_none());
        let frame = framer.push(b", 3]").unwrap().unwrap();
        assert_eq!(frame.value, json!([1, 2, 3]));
    }

    #[test]
    fn test_buffer_ceiling() {
        let mut framer = ResponseFramer::new(8);
        assert!(framer.push(b"{\"a\":").unwrap().is_none());
        let err = framer.push(b"\"long\"}").unwrap_err();
        assert!(matches!(err, EngineError::ResponseTooLarge { limit: 8 }));
    }

    #[tokio::test]
    async fn test_read_response_small_chunks() {
        let payload = br#"{"status":"success","result":{"node_id":"1234-ABCD"}}"#;
        let mut reader: &[u8] = payload;
        let frame = read_response(&mut reader, 5, LIMIT, None).await.unwrap();
        assert_eq!(frame.value["result"]["node_id"], "1234-ABCD");
    }

    #[tokio::test]
    async fn test_read_response_stops_at_first_complete_value() {
        // Bytes after the first value are never read when the value fits in one chunk.
        let (mut client, mut server) = tokio::io::duplex(64);
        tokio::io::AsyncWriteExt::write_all(&mut server, br#"{"status":"success"}"#)
            .await
            .unwrap();
        let frame = read_response(&mut client, 4096, LIMIT, Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(frame.value["status"], "success");
        drop(server);
    }

    #[tokio::test]
    async fn test_read_response_close_with_garbage() {
        let mut reader: &[u8] = b"not json at all";
        let err = read_response(&mut reader, 4, LIMIT, None).await.unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_response_times_out_on_silent_peer() {
        let (mut client, _server) = tokio::io::duplex(64);
        let err = read_response(&mut client, 4096, LIMIT, Some(Duration::from_millis(250)))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ReadTimeout(d) if d == Duration::from_millis(250)));
    }
}
