//! Progress event stream
//!
//! A translation round trip reports progress as a strictly ordered sequence of
//! named events, framed as blocks of one `event:` line and one `data:` line
//! (a JSON payload) terminated by a blank line:
//!
//! ```text
//! event: translated
//! data: {"translated":"Hello"}
//!
//! ```
//!
//! [`StreamEvent::to_frame`] produces such blocks; [`EventStreamParser`] turns
//! arbitrarily chunked bytes back into events. Malformed blocks are skipped,
//! never treated as errors.

use serde_json::{json, Value};
use tracing::debug;

/// A single progress event of a round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The text translated into the target language
    Translated(String),
    /// The translation translated back into the source language
    BackTranslated(String),
    /// The model's comparison of original and back-translation
    Review(String),
    /// Processing failed; nothing follows
    Error(String),
    /// Normal end of stream
    Complete,
}

impl StreamEvent {
    /// Event name as written on the `event:` line
    pub fn name(&self) -> &'static str {
        match self {
            StreamEvent::Translated(_) => "translated",
            StreamEvent::BackTranslated(_) => "back_translated",
            StreamEvent::Review(_) => "review",
            StreamEvent::Error(_) => "error",
            StreamEvent::Complete => "complete",
        }
    }

    /// Whether no further events follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Error(_) | StreamEvent::Complete)
    }

    /// JSON payload carried on the `data:` line
    pub fn payload(&self) -> Value {
        match self {
            StreamEvent::Translated(text) => json!({ "translated": text }),
            StreamEvent::BackTranslated(text) => json!({ "back_translated": text }),
            StreamEvent::Review(text) => json!({ "review": text }),
            StreamEvent::Error(message) => json!({ "error": message }),
            StreamEvent::Complete => json!({}),
        }
    }

    /// Encode as one complete block, including the terminating blank line
    pub fn to_frame(&self) -> String {
        format!("event: {}\ndata: {}\n\n", self.name(), self.payload())
    }

    /// Build an event from its name and decoded payload.
    ///
    /// Returns `None` for unknown names and for payloads missing their field.
    pub fn from_payload(name: &str, payload: &Value) -> Option<Self> {
        let field = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);

        match name {
            "translated" => field("translated").map(StreamEvent::Translated),
            "back_translated" => field("back_translated").map(StreamEvent::BackTranslated),
            "review" => field("review").map(StreamEvent::Review),
            "error" => field("error").map(StreamEvent::Error),
            "complete" => Some(StreamEvent::Complete),
            _ => None,
        }
    }
}

/// Parse one block (without its terminating blank line).
///
/// `None` means "skip": the block lacks an `event:` or `data:` line, names an
/// unknown event, or carries data that is not the expected JSON payload.
/// Several `data:` lines are joined with `\n`.
pub fn parse_block(block: &str) -> Option<StreamEvent> {
    let mut name: Option<&str> = None;
    let mut data: Option<String> = None;

    for line in block.lines() {
        let line = line.trim_end_matches('\r');

        if let Some(value) = line.strip_prefix("event:") {
            name = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("data:") {
            let value = value.strip_prefix(' ').unwrap_or(value);
            match data.as_mut() {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(value);
                }
                None => data = Some(value.to_string()),
            }
        }
    }

    let name = name.filter(|n| !n.is_empty())?;
    let payload: Value = serde_json::from_str(data?.trim()).ok()?;
    StreamEvent::from_payload(name, &payload)
}

/// Incremental parser for a chunked event stream
///
/// Bytes that do not yet form a complete block are retained until the next
/// [`feed`](Self::feed) or until [`finish`](Self::finish) flushes them.
/// Chunk boundaries may fall anywhere, including inside a UTF-8 sequence.
#[derive(Debug, Default)]
pub struct EventStreamParser {
    buffer: Vec<u8>,

    /// Prefix of `buffer` already searched for a block end
    scanned: usize,

    discarded: usize,
}

impl EventStreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return every event completed by it, in order
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer
            .extend(chunk.iter().copied().filter(|byte| *byte != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = find_block_end(&self.buffer, self.scanned) {
            let block: Vec<u8> = self.buffer.drain(..end + 2).collect();
            self.scanned = 0;
            self.dispatch(&block[..end], &mut events);
        }
        // back off one byte so a separator split across chunks is still found
        self.scanned = self.buffer.len().saturating_sub(1);
        events
    }

    /// Flush whatever is left once the stream has closed
    pub fn finish(mut self) -> Option<StreamEvent> {
        let rest = std::mem::take(&mut self.buffer);
        let mut events = Vec::new();
        self.dispatch(&rest, &mut events);
        events.pop()
    }

    /// Bytes currently retained waiting for the end of a block
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Non-empty blocks skipped as malformed so far
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    fn dispatch(&mut self, block: &[u8], events: &mut Vec<StreamEvent>) {
        let text = String::from_utf8_lossy(block);
        if text.trim().is_empty() {
            return;
        }

        match parse_block(&text) {
            Some(event) => events.push(event),
            None => {
                self.discarded += 1;
                debug!(block_len = block.len(), "discarding malformed event block");
            }
        }
    }
}

fn find_block_end(buffer: &[u8], from: usize) -> Option<usize> {
    buffer[from..]
        .windows(2)
        .position(|pair| pair == b"\n\n")
        .map(|offset| offset + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<StreamEvent> {
        vec![
            StreamEvent::Translated("Árvíztűrő tükörfúrógép".to_string()),
            StreamEvent::BackTranslated("Flood-proof \"mirror\" drill\nsecond line".to_string()),
            StreamEvent::Review("Meaning preserved.".to_string()),
            StreamEvent::Complete,
        ]
    }

    fn sample_stream() -> String {
        sample_events().iter().map(StreamEvent::to_frame).collect()
    }

    #[test]
    fn test_frame_format() {
        assert_eq!(
            StreamEvent::Review("ok".to_string()).to_frame(),
            "event: review\ndata: {\"review\":\"ok\"}\n\n"
        );
        assert_eq!(StreamEvent::Complete.to_frame(), "event: complete\ndata: {}\n\n");
    }

    #[test]
    fn test_parse_block() {
        let event = parse_block("event: translated\ndata: {\"translated\": \"Hi\"}");
        assert_eq!(event, Some(StreamEvent::Translated("Hi".to_string())));

        let event = parse_block("event:error\ndata:{\"error\":\"boom\"}");
        assert_eq!(event, Some(StreamEvent::Error("boom".to_string())));
    }

    #[test]
    fn test_malformed_blocks_are_skipped() {
        assert_eq!(parse_block("data: {\"translated\":\"x\"}"), None);
        assert_eq!(parse_block("event: translated"), None);
        assert_eq!(parse_block("event: translated\ndata: not json"), None);
        assert_eq!(parse_block("event: translated\ndata: {\"review\":\"x\"}"), None);
        assert_eq!(parse_block("event: progress\ndata: {}"), None);
        assert_eq!(parse_block("event: \ndata: {}"), None);
    }

    #[test]
    fn test_multiple_data_lines_are_joined() {
        let event = parse_block("event: review\ndata: {\"review\":\ndata: \"joined\"}");
        assert_eq!(event, Some(StreamEvent::Review("joined".to_string())));
    }

    #[test]
    fn test_feed_whole_stream() {
        let mut parser = EventStreamParser::new();
        let events = parser.feed(sample_stream().as_bytes());

        assert_eq!(events, sample_events());
        assert_eq!(parser.pending(), 0);
    }

    #[test]
    fn test_feed_split_at_every_offset() {
        let stream = sample_stream();
        let bytes = stream.as_bytes();

        for split in 0..=bytes.len() {
            let mut parser = EventStreamParser::new();
            let mut events = parser.feed(&bytes[..split]);
            events.extend(parser.feed(&bytes[split..]));

            assert_eq!(events, sample_events(), "split at byte {split}");
        }
    }

    #[test]
    fn test_feed_one_byte_at_a_time() {
        let mut parser = EventStreamParser::new();
        let events: Vec<StreamEvent> = sample_stream()
            .as_bytes()
            .iter()
            .flat_map(|byte| parser.feed(std::slice::from_ref(byte)))
            .collect();

        assert_eq!(events, sample_events());
    }

    #[test]
    fn test_separator_split_across_feeds() {
        let mut parser = EventStreamParser::new();
        assert!(parser.feed(b"event: complete\ndata: {}\n").is_empty());
        assert!(parser.feed(b"\r").is_empty());
        assert_eq!(parser.feed(b"\nevent: rev"), vec![StreamEvent::Complete]);
        assert_eq!(parser.pending(), "event: rev".len());
    }

    #[test]
    fn test_large_payload_one_byte_at_a_time() {
        let text = "szó ".repeat(5_000);
        let stream = format!(
            "{}{}",
            StreamEvent::Translated(text.clone()).to_frame(),
            StreamEvent::Complete.to_frame()
        );

        let mut parser = EventStreamParser::new();
        let mut events = Vec::new();
        for byte in stream.as_bytes() {
            events.extend(parser.feed(std::slice::from_ref(byte)));
        }

        assert_eq!(
            events,
            vec![StreamEvent::Translated(text), StreamEvent::Complete]
        );
        assert_eq!(parser.pending(), 0);
    }

    #[test]
    fn test_crlf_stream() {
        let stream = sample_stream().replace('\n', "\r\n");
        let mut parser = EventStreamParser::new();
        assert_eq!(parser.feed(stream.as_bytes()), sample_events());
    }

    #[test]
    fn test_malformed_block_between_good_ones() {
        let stream = format!(
            "{}event: translated\ndata: {{broken\n\n: comment only\n\n{}",
            StreamEvent::Translated("a".to_string()).to_frame(),
            StreamEvent::Complete.to_frame(),
        );

        let mut parser = EventStreamParser::new();
        let events = parser.feed(stream.as_bytes());

        assert_eq!(
            events,
            vec![StreamEvent::Translated("a".to_string()), StreamEvent::Complete]
        );
        assert_eq!(parser.discarded(), 2);
    }

    #[test]
    fn test_finish_flushes_unterminated_block() {
        let mut parser = EventStreamParser::new();
        assert!(parser
            .feed(b"event: review\ndata: {\"review\":\"tail\"}")
            .is_empty());
        assert!(parser.pending() > 0);

        assert_eq!(
            parser.finish(),
            Some(StreamEvent::Review("tail".to_string()))
        );
    }

    #[test]
    fn test_finish_on_empty_buffer() {
        let mut parser = EventStreamParser::new();
        parser.feed(StreamEvent::Complete.to_frame().as_bytes());
        assert_eq!(parser.finish(), None);
    }

    #[test]
    fn test_terminal_events() {
        assert!(StreamEvent::Complete.is_terminal());
        assert!(StreamEvent::Error("x".to_string()).is_terminal());
        assert!(!StreamEvent::Review("x".to_string()).is_terminal());
    }
}
