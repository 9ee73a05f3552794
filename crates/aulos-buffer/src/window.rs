#![forbid(unsafe_code)]

//! Retained byte window.
//!
//! `ByteWindow` holds the contiguous span of stream bytes that have been
//! delivered but not yet consumed, logically `[read_offset, read_offset + len)`.
//! Delivered chunks are kept as `Bytes` segments so appends never copy; a
//! head cursor tracks how far into the front segment consumption has advanced.
//!
//! Mutation paths are deliberately narrow: `append` at the tail (delivery),
//! `consume` at the head (read or seek fast-forward), `clear` on stream close.

use std::collections::VecDeque;

use bytes::Bytes;

/// Contiguous FIFO of delivered-not-yet-consumed bytes.
#[derive(Debug, Default)]
pub struct ByteWindow {
    segments: VecDeque<Bytes>,
    /// Bytes of the front segment already consumed.
    head: usize,
    /// Total retained bytes across all segments, minus `head`.
    len: usize,
}

impl ByteWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained byte count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a delivered chunk at the tail.
    ///
    /// Empty chunks are ignored.
    pub fn append(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.segments.push_back(chunk);
    }

    /// Copy up to `buf.len()` bytes from the head without removing them.
    ///
    /// Returns the number of bytes copied: `min(buf.len(), self.len())`.
    pub fn read_front(&self, buf: &mut [u8]) -> usize {
        let mut copied = 0;
        let mut skip = self.head;

        for segment in &self.segments {
            if copied == buf.len() {
                break;
            }
            let avail = &segment[skip..];
            let n = avail.len().min(buf.len() - copied);
            buf[copied..copied + n].copy_from_slice(&avail[..n]);
            copied += n;
            skip = 0;
        }

        copied
    }

    /// Drop `n` bytes from the head.
    ///
    /// # Panics
    ///
    /// Panics if `n > len()`. Over-consuming means a broken invariant in the
    /// caller's accounting, not a recoverable condition.
    pub fn consume(&mut self, n: usize) {
        assert!(
            n <= self.len,
            "consume({n}) exceeds retained window ({} bytes)",
            self.len
        );

        let mut remaining = n;
        while remaining > 0 {
            let front_left = self.segments[0].len() - self.head;
            if remaining >= front_left {
                self.segments.pop_front();
                self.head = 0;
                remaining -= front_left;
            } else {
                self.head += remaining;
                remaining = 0;
            }
        }
        self.len -= n;
    }

    /// Discard all retained bytes.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.head = 0;
        self.len = 0;
    }
}
