#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used by `aulos-io`.
pub type IoResult<T> = Result<T, IoError>;

/// Errors produced by the bridge.
///
/// Notes:
/// - End-of-stream and buffer-miss are *not* errors; they are defined
///   results carried by [`ReadOutcome`](crate::ReadOutcome) and
///   [`SeekOutcome`](crate::SeekOutcome).
/// - All variants are local, synchronous classifications returned directly
///   to the caller; the bridge never retries on its own.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    /// Malformed input: empty buffer, negative seek target.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Operation is meaningless given current knowledge, e.g. a seek
    /// relative to the end of a stream whose length is unknown.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Operation cannot be serviced at all, e.g. a size query when the
    /// transport never declared a length.
    #[error("not supported: {0}")]
    NotSupported(&'static str),
}
