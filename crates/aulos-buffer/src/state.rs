#![forbid(unsafe_code)]

//! Per-stream metadata: binding, content-length latch, read cursor.

use std::time::Instant;

/// Identifier of a logical transport stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub u64);

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared total length of a stream, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLength {
    Known(u64),
    /// The transport cannot determine the total (e.g. chunked delivery).
    Unknown,
}

impl ContentLength {
    pub fn known(self) -> Option<u64> {
        match self {
            Self::Known(n) => Some(n),
            Self::Unknown => None,
        }
    }
}

/// Metadata for the currently bound stream.
///
/// Owned by the bridge and mutated only under its lock. `content_length` is a
/// one-shot latch: set exactly once per binding, on the first delivered chunk.
/// Latching twice is a programming error and panics.
#[derive(Debug, Default)]
pub struct StreamState {
    stream_id: Option<StreamId>,
    content_length: Option<ContentLength>,
    read_offset: u64,
    first_chunk_at: Option<Instant>,
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently bound stream, if any.
    pub fn stream_id(&self) -> Option<StreamId> {
        self.stream_id
    }

    /// Bind to `id` if unbound. Returns true if this call performed the bind.
    pub fn bind(&mut self, id: StreamId) -> bool {
        if self.stream_id.is_some() {
            return false;
        }
        self.stream_id = Some(id);
        true
    }

    /// Declared total length, if latched.
    pub fn content_length(&self) -> Option<ContentLength> {
        self.content_length
    }

    /// Arrival time of the first delivered chunk, for diagnostics.
    pub fn first_chunk_at(&self) -> Option<Instant> {
        self.first_chunk_at
    }

    /// Whether the first chunk for this binding has been observed.
    pub fn first_chunk_seen(&self) -> bool {
        self.content_length.is_some()
    }

    /// Latch the declared length and first-chunk timestamp.
    ///
    /// # Panics
    ///
    /// Panics if already latched for this binding.
    pub fn latch_content_length(&mut self, length: ContentLength) {
        assert!(
            self.content_length.is_none(),
            "content length latched twice for stream {:?}",
            self.stream_id
        );
        self.content_length = Some(length);
        self.first_chunk_at = Some(Instant::now());
    }

    /// Cursor of the next byte the consumer will receive.
    pub fn read_offset(&self) -> u64 {
        self.read_offset
    }

    /// Advance the cursor after consuming `n` bytes.
    pub fn advance(&mut self, n: u64) {
        self.read_offset += n;
        debug_assert!(
            self.content_length
                .and_then(ContentLength::known)
                .is_none_or(|len| self.read_offset <= len),
            "read offset {} past declared length",
            self.read_offset
        );
    }

    /// Move the cursor to an absolute offset (seek fast-forward).
    pub fn set_read_offset(&mut self, offset: u64) {
        self.read_offset = offset;
    }

    /// Whether the cursor sits at or past a known end of stream.
    pub fn at_eof(&self) -> bool {
        matches!(
            self.content_length,
            Some(ContentLength::Known(len)) if self.read_offset >= len
        )
    }

    /// Return to the unbound state: no stream, no latch, cursor at 0.
    ///
    /// The first-chunk timestamp is cleared with the latch; a new binding
    /// records its own.
    pub fn reset(&mut self) {
        self.stream_id = None;
        self.content_length = None;
        self.read_offset = 0;
        self.first_chunk_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_once() {
        let mut state = StreamState::new();
        assert!(state.bind(StreamId(4)));
        assert!(!state.bind(StreamId(8)));
        assert_eq!(state.stream_id(), Some(StreamId(4)));
    }

    #[test]
    fn test_latch_known_length() {
        let mut state = StreamState::new();
        assert!(!state.first_chunk_seen());

        state.latch_content_length(ContentLength::Known(1000));
        assert!(state.first_chunk_seen());
        assert_eq!(state.content_length(), Some(ContentLength::Known(1000)));
        assert!(state.first_chunk_at().is_some());
    }

    #[test]
    #[should_panic(expected = "latched twice")]
    fn test_double_latch_panics() {
        let mut state = StreamState::new();
        state.latch_content_length(ContentLength::Unknown);
        state.latch_content_length(ContentLength::Known(5));
    }

    #[test]
    fn test_advance_and_eof() {
        let mut state = StreamState::new();
        state.latch_content_length(ContentLength::Known(10));

        state.advance(4);
        assert_eq!(state.read_offset(), 4);
        assert!(!state.at_eof());

        state.advance(6);
        assert!(state.at_eof());
    }

    #[test]
    fn test_unknown_length_never_eof() {
        let mut state = StreamState::new();
        state.latch_content_length(ContentLength::Unknown);
        state.advance(1_000_000);
        assert!(!state.at_eof());
    }

    #[test]
    fn test_reset_clears_binding_and_latch() {
        let mut state = StreamState::new();
        state.bind(StreamId(4));
        state.latch_content_length(ContentLength::Known(100));
        state.advance(50);

        state.reset();
        assert_eq!(state.stream_id(), None);
        assert_eq!(state.content_length(), None);
        assert_eq!(state.read_offset(), 0);
        assert!(state.first_chunk_at().is_none());

        // A fresh binding may latch again.
        assert!(state.bind(StreamId(8)));
        state.latch_content_length(ContentLength::Unknown);
    }
}
