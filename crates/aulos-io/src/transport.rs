#![forbid(unsafe_code)]

//! Boundary with the transport/session collaborator.

use aulos_buffer::StreamId;

/// Stream-control surface the bridge consumes.
///
/// This is intentionally minimal and does **not** depend on any concrete
/// transport. The session layer (QUIC, HTTP, anything that delivers ordered
/// chunks for a single logical stream) implements this and invokes
/// [`StreamBridge::deliver`](crate::StreamBridge::deliver) from its own
/// thread.
///
/// Normative:
/// - `declared_len` is queried exactly once per binding, when the first chunk
///   for that stream is delivered. `None` means the transport cannot
///   determine the total (unbounded or chunked delivery).
/// - `cancel_stream` must request reset/cancellation of the stream at the
///   peer. It is called by
///   [`close_current_stream`](crate::StreamBridge::close_current_stream)
///   after the bridge has already torn down its local state, so it may not
///   re-enter the bridge for that stream.
pub trait StreamTransport: Send + Sync {
    /// Declared total byte count for `stream`, if the transport knows it.
    fn declared_len(&self, stream: StreamId) -> Option<u64>;

    /// Whether a session capable of stream control is currently open.
    fn is_active(&self) -> bool;

    /// Request cancellation of `stream` at the transport layer.
    fn cancel_stream(&self, stream: StreamId);
}
