//! `aulos-buffer`
//!
//! Pure data model for the aulos read/seek bridge.
//!
//! ## Components
//! - [`ByteWindow`]: contiguous FIFO of delivered-not-yet-consumed bytes
//! - [`StreamState`]: stream binding, content-length latch, read cursor
//! - [`SufficiencyPolicy`]: decides when a blocked reader may be woken
//!
//! No I/O, no threads, no locks. Synchronization lives in `aulos-io`, which
//! owns these types behind a single mutex.

#![forbid(unsafe_code)]

mod policy;
mod state;
mod window;

pub use policy::{DEFAULT_BLOCK_SIZE, SufficiencyPolicy};
pub use state::{ContentLength, StreamId, StreamState};
pub use window::ByteWindow;
