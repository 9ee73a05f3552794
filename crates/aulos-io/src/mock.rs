#![forbid(unsafe_code)]

//! Test double for the transport boundary.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use aulos_buffer::StreamId;
use parking_lot::Mutex;

use crate::transport::StreamTransport;

/// In-memory [`StreamTransport`] that records stream cancellations and
/// counts declared-length queries.
#[derive(Debug)]
pub struct MockTransport {
    declared_len: Option<u64>,
    active: AtomicBool,
    len_queries: AtomicUsize,
    cancelled: Mutex<Vec<StreamId>>,
}

impl MockTransport {
    /// `declared_len` is what `declared_len()` reports for every stream;
    /// `None` models a transport that cannot determine the total.
    pub fn new(declared_len: Option<u64>) -> Self {
        Self {
            declared_len,
            active: AtomicBool::new(true),
            len_queries: AtomicUsize::new(0),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    /// Simulate session teardown.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Streams cancelled so far, in order.
    pub fn cancelled(&self) -> Vec<StreamId> {
        self.cancelled.lock().clone()
    }

    /// How many times `declared_len` was queried.
    pub fn declared_len_queries(&self) -> usize {
        self.len_queries.load(Ordering::Acquire)
    }
}

impl StreamTransport for MockTransport {
    fn declared_len(&self, _stream: StreamId) -> Option<u64> {
        self.len_queries.fetch_add(1, Ordering::AcqRel);
        self.declared_len
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn cancel_stream(&self, stream: StreamId) {
        self.cancelled.lock().push(stream);
    }
}
