#![forbid(unsafe_code)]

//! The producer/consumer bridge.
//!
//! One `Mutex<Shared>` + `Condvar` pair guards the retained window and the
//! per-stream state. The transport thread feeds [`StreamBridge::deliver`];
//! a single consumer thread calls [`StreamBridge::read`] and
//! [`StreamBridge::seek`]. All mutation goes through these methods; the
//! shared state never escapes the lock.

use std::sync::Arc;

use aulos_buffer::{ByteWindow, ContentLength, StreamId, StreamState, SufficiencyPolicy};
use bytes::Bytes;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::{
    error::{IoError, IoResult},
    transport::StreamTransport,
    types::{ReadOutcome, SeekOutcome, WaitMode, Whence},
};

/// State guarded by the bridge lock.
#[derive(Debug, Default)]
struct Shared {
    window: ByteWindow,
    state: StreamState,
}

impl Shared {
    fn is_sufficient(&self, policy: &SufficiencyPolicy) -> bool {
        policy.is_sufficient(
            self.window.len(),
            self.state.content_length(),
            self.state.read_offset(),
        )
    }
}

struct Inner {
    transport: Arc<dyn StreamTransport>,
    policy: SufficiencyPolicy,
    shared: Mutex<Shared>,
    cond: Condvar,
}

/// Blocking read/seek bridge over an asynchronously delivered byte stream.
///
/// Clone is cheap; all clones refer to the same underlying bridge. Hand one
/// clone to the transport (for `deliver`) and one to the consumer thread.
///
/// # Contract (normative)
/// - `deliver` is the sole write path into the window tail and the sole
///   source of the content length.
/// - `read` makes **one** wait attempt per call: after a single timed or
///   indefinite wait returns (signal, timeout, or spurious wake), it proceeds
///   with whatever is retained, even if still below a full block. Bounded
///   worst-case latency, never wait twice.
/// - `seek` only classifies: it either fast-forwards within the retained
///   window or reports a miss for the caller to escalate. It never touches
///   the network.
/// - One consumer thread is assumed; `read` and `seek` still take the shared
///   lock, so a second consumer degrades to contention rather than a data
///   race.
#[derive(Clone)]
pub struct StreamBridge {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for StreamBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.inner.shared.lock();
        f.debug_struct("StreamBridge")
            .field("stream_id", &shared.state.stream_id())
            .field("read_offset", &shared.state.read_offset())
            .field("buffered", &shared.window.len())
            .finish_non_exhaustive()
    }
}

impl StreamBridge {
    pub fn new(transport: Arc<dyn StreamTransport>) -> Self {
        Self::with_policy(transport, SufficiencyPolicy::default())
    }

    pub fn with_policy(transport: Arc<dyn StreamTransport>, policy: SufficiencyPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                policy,
                shared: Mutex::new(Shared::default()),
                cond: Condvar::new(),
            }),
        }
    }

    /// Delivery callback: feed one in-order chunk for `stream`.
    ///
    /// Invoked by the transport thread. Binds the stream if unbound, latches
    /// the declared content length on the first chunk, appends the chunk and
    /// broadcasts to waiters once the window becomes sufficient.
    pub fn deliver(&self, stream: StreamId, chunk: Bytes) {
        let mut shared = self.inner.shared.lock();

        if shared.state.bind(stream) {
            debug!(%stream, "bound to stream");
        }

        if !shared.state.first_chunk_seen() {
            let length = match self.inner.transport.declared_len(stream) {
                Some(n) => ContentLength::Known(n),
                None => ContentLength::Unknown,
            };
            shared.state.latch_content_length(length);
            debug!(%stream, ?length, "first chunk, latched content length");
        }

        trace!(%stream, len = chunk.len(), "chunk delivered");
        shared.window.append(chunk);

        if shared.is_sufficient(&self.inner.policy) {
            self.inner.cond.notify_all();
        }
    }

    /// Blocking read: copy up to `buf.len()` bytes at the current offset.
    ///
    /// Returns [`ReadOutcome::Eof`] once the offset reaches a known content
    /// length. Otherwise waits according to `wait` while the window is not
    /// sufficient (a single attempt), then drains `min(buf.len(), retained)`
    /// bytes and advances the read offset. `Ok(ReadOutcome::Read(0))` is a
    /// valid result when nothing was retained and the wait was non-blocking
    /// or timed out.
    pub fn read(&self, buf: &mut [u8], wait: WaitMode) -> IoResult<ReadOutcome> {
        if buf.is_empty() {
            return Err(IoError::InvalidArgument("empty read buffer"));
        }

        let mut shared = self.inner.shared.lock();

        if shared.state.at_eof() {
            return Ok(ReadOutcome::Eof);
        }

        if !shared.is_sufficient(&self.inner.policy) {
            // Single wait attempt; a woken-but-still-insufficient window is
            // accepted and whatever is retained gets returned.
            match wait {
                WaitMode::NonBlocking => {}
                WaitMode::Timeout(timeout) => {
                    if self.inner.cond.wait_for(&mut shared, timeout).timed_out() {
                        trace!(?timeout, "read wait timed out");
                    }
                }
                WaitMode::Blocking => {
                    self.inner.cond.wait(&mut shared);
                }
            }
        }

        let n = shared.window.read_front(buf);
        if n > 0 {
            shared.window.consume(n);
            shared.state.advance(n as u64);
        }
        trace!(
            bytes = n,
            offset = shared.state.read_offset(),
            "read drained"
        );
        Ok(ReadOutcome::Read(n))
    }

    /// Resolve a seek against the retained window.
    ///
    /// Classification only: a hit consumes the in-window prefix and moves the
    /// read offset; a [`SeekOutcome::Miss`] tells the caller to re-request
    /// the stream at `target` from the transport. Backward targets are never
    /// serviced locally, even when the bytes are still retained.
    pub fn seek(&self, offset: i64, whence: Whence) -> IoResult<SeekOutcome> {
        let mut shared = self.inner.shared.lock();
        let length = shared.state.content_length();
        let read_offset = shared.state.read_offset();

        if whence == Whence::Size {
            return match length {
                Some(ContentLength::Known(n)) => Ok(SeekOutcome::At(n)),
                _ => Err(IoError::NotSupported("stream length unknown")),
            };
        }

        // No-op fast path: nothing to move, nothing to touch.
        if (whence == Whence::Current && offset == 0)
            || (whence == Whence::Start && offset >= 0 && offset as u64 == read_offset)
        {
            return Ok(SeekOutcome::At(read_offset));
        }

        let target: i128 = match whence {
            Whence::Start => offset as i128,
            Whence::Current => (read_offset as i128).saturating_add(offset as i128),
            Whence::End => {
                let Some(ContentLength::Known(total)) = length else {
                    return Err(IoError::InvalidState(
                        "seek from end requires known length",
                    ));
                };
                (total as i128).saturating_add(offset as i128)
            }
            Whence::Size => unreachable!("handled above"),
        };

        if target < 0 {
            return Err(IoError::InvalidArgument("negative seek target"));
        }
        let target = target as u64;

        // Buffer-hit check: only a forward move that stays strictly inside
        // the retained window can be served by dropping a consumed prefix.
        let retained = shared.window.len() as u64;
        if target > read_offset {
            let delta = target - read_offset;
            if delta < retained {
                shared.window.consume(delta as usize);
                shared.state.set_read_offset(target);
                debug!(target, consumed = delta, "seek hit retained window");
                return Ok(SeekOutcome::At(target));
            }
        }

        debug!(target, read_offset, retained, "seek missed retained window");
        Ok(SeekOutcome::Miss { target })
    }

    /// Close the currently bound stream.
    ///
    /// Returns false (no-op) when no stream is bound or no session is active.
    /// Otherwise resets the bridge to the unbound state (offset 0, window
    /// drained, latch cleared), wakes any blocked reader so it observes the
    /// reset instead of sleeping out its timeout, and requests cancellation
    /// of the stream at the transport. Idempotent.
    pub fn close_current_stream(&self) -> bool {
        let stream = {
            let mut shared = self.inner.shared.lock();
            let Some(stream) = shared.state.stream_id() else {
                return false;
            };
            if !self.inner.transport.is_active() {
                return false;
            }

            debug!(%stream, "closing stream");
            shared.state.reset();
            shared.window.clear();
            self.inner.cond.notify_all();
            stream
        };

        // Cancellation is requested outside the lock so a transport that
        // calls back into the bridge cannot deadlock.
        self.inner.transport.cancel_stream(stream);
        true
    }

    /// Currently bound stream, if any.
    pub fn stream_id(&self) -> Option<StreamId> {
        self.inner.shared.lock().state.stream_id()
    }

    /// Declared content length, if latched.
    pub fn content_length(&self) -> Option<ContentLength> {
        self.inner.shared.lock().state.content_length()
    }

    /// Cursor of the next byte the consumer will receive.
    pub fn read_offset(&self) -> u64 {
        self.inner.shared.lock().state.read_offset()
    }

    /// Retained byte count.
    pub fn buffered(&self) -> usize {
        self.inner.shared.lock().window.len()
    }

    /// Arrival time of the first delivered chunk, for diagnostics.
    pub fn first_chunk_at(&self) -> Option<std::time::Instant> {
        self.inner.shared.lock().state.first_chunk_at()
    }
}
