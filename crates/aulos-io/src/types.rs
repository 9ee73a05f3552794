#![forbid(unsafe_code)]

//! Request and outcome types for the bridge API.

use std::time::Duration;

/// How long a [`read`](crate::StreamBridge::read) call may block when the
/// retained window is not yet sufficient.
///
/// Exactly one wait attempt is made per call; see the read contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Proceed immediately with whatever is retained (possibly nothing).
    NonBlocking,
    /// Wait once, up to the given duration, then proceed regardless.
    Timeout(Duration),
    /// Wait until signaled by delivery or stream close.
    Blocking,
}

/// Seek origin, mirroring file-seek semantics plus a size query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset from the start of the stream.
    Start,
    /// Relative to the current read offset.
    Current,
    /// Relative to the declared end of the stream.
    End,
    /// Report the declared total length; the offset argument is ignored.
    Size,
}

/// Result of a successful [`read`](crate::StreamBridge::read) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Bytes copied into the caller's buffer. Zero is valid when nothing was
    /// retained and the wait was non-blocking or timed out.
    Read(usize),
    /// The read offset is at or past the declared content length.
    Eof,
}

/// Result of a successful [`seek`](crate::StreamBridge::seek) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    /// The request was satisfied locally; the stream position (or, for
    /// [`Whence::Size`], the declared length).
    At(u64),
    /// The target lies outside the retained window. The caller must escalate
    /// to the transport layer and re-request the stream at `target`; the
    /// bridge itself performs no network action.
    Miss { target: u64 },
}
