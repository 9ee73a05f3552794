#![forbid(unsafe_code)]

//! Buffer-sufficiency heuristic.
//!
//! Decides when a blocked reader may stop waiting. The policy coalesces small
//! network chunks into block-sized batches so the reader is not woken on every
//! datagram, while still releasing the final partial block near end of stream.

use crate::state::ContentLength;

/// One read-block unit: readers are woken once this much is retained.
pub const DEFAULT_BLOCK_SIZE: usize = 32 * 1024;

/// Pure wake-worthiness predicate.
#[derive(Debug, Clone, Copy)]
pub struct SufficiencyPolicy {
    block_size: usize,
}

impl Default for SufficiencyPolicy {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl SufficiencyPolicy {
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Whether the consumer can proceed without more data.
    ///
    /// Rules, in order:
    /// 1. Length not known: any retained byte is enough; we cannot reason
    ///    about remaining bytes, and holding the reader indefinitely would
    ///    stall it.
    /// 2. Nothing retained: not sufficient.
    /// 3. Fewer than `block_size` bytes remain in the stream: sufficient —
    ///    the tail may legitimately be smaller than a full block.
    /// 4. Otherwise: sufficient once a full block is retained.
    pub fn is_sufficient(
        &self,
        buffered: usize,
        length: Option<ContentLength>,
        read_offset: u64,
    ) -> bool {
        let Some(ContentLength::Known(total)) = length else {
            return buffered > 0;
        };

        if buffered == 0 {
            return false;
        }

        if total.saturating_sub(read_offset) < self.block_size as u64 {
            return true;
        }

        buffered >= self.block_size
    }
}
