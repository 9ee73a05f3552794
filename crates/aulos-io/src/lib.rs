//! # Aulos I/O Bridge
//!
//! Bridge between an asynchronously delivered network byte stream and a
//! synchronous, blocking, partially seekable read interface. Built for
//! pull-based consumers such as media demuxers: a transport thread feeds
//! ordered chunks in, a worker thread pulls block-sized reads out.
//!
//! ## Core Components
//!
//! - [`StreamBridge`]: mutex/condvar-synchronized window + stream state
//! - [`StreamTransport`]: boundary trait the session layer implements
//! - [`BridgeReader`]: `std::io::Read + Seek` adapter over the bridge
//!
//! ## Read Contract (Normative)
//!
//! **Contract:** `read` makes exactly one wait attempt per call. Once the
//! single timed or indefinite wait returns, the call drains whatever is
//! retained, even below a full block. `ReadOutcome::Read(0)` is a valid
//! non-error result; `ReadOutcome::Eof` is returned only against a known
//! content length.
//!
//! ## Seek Contract (Normative)
//!
//! **Contract:** `seek` classifies, never fetches. A forward target strictly
//! inside the retained window is served by dropping the consumed prefix;
//! anything else is a `SeekOutcome::Miss` carrying the resolved target for
//! the caller to re-request at the transport level. Backward seeks are never
//! served locally.

#![forbid(unsafe_code)]

pub mod bridge;
pub mod error;
pub mod reader;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

// Re-export public API
pub use aulos_buffer::{ContentLength, StreamId, SufficiencyPolicy};
pub use bridge::StreamBridge;
pub use error::{IoError, IoResult};
pub use reader::BridgeReader;
pub use transport::StreamTransport;
pub use types::{ReadOutcome, SeekOutcome, WaitMode, Whence};
