#![forbid(unsafe_code)]

//! Sync `Read + Seek` adapter for demuxer consumers.
//!
//! `BridgeReader` wraps a [`StreamBridge`] clone in the `std::io` traits that
//! pull-based media demuxers expect. It cannot escalate a buffer miss to the
//! transport itself, so a missed seek surfaces as `ErrorKind::Unsupported`;
//! consumers that can reopen the stream at an offset should drive the bridge
//! API directly instead.

use std::io::{Read, Seek, SeekFrom};

use crate::{
    bridge::StreamBridge,
    error::IoError,
    types::{ReadOutcome, SeekOutcome, WaitMode, Whence},
};

pub struct BridgeReader {
    bridge: StreamBridge,
    wait: WaitMode,
}

impl BridgeReader {
    /// Reads block until the window is sufficient or the stream closes.
    pub fn new(bridge: StreamBridge) -> Self {
        Self {
            bridge,
            wait: WaitMode::Blocking,
        }
    }

    /// Override how long reads may block.
    pub fn with_wait_mode(mut self, wait: WaitMode) -> Self {
        self.wait = wait;
        self
    }

    /// Total stream length if the transport declared one.
    pub fn len(&self) -> Option<u64> {
        self.bridge.content_length().and_then(|l| l.known())
    }

    /// Check if length is zero or unknown.
    pub fn is_empty(&self) -> bool {
        self.len().is_none_or(|l| l == 0)
    }

    /// Current position in the stream.
    pub fn position(&self) -> u64 {
        self.bridge.read_offset()
    }
}

fn map_err(err: IoError) -> std::io::Error {
    let kind = match err {
        IoError::InvalidArgument(_) => std::io::ErrorKind::InvalidInput,
        IoError::InvalidState(_) | IoError::NotSupported(_) => std::io::ErrorKind::Unsupported,
    };
    std::io::Error::new(kind, err)
}

impl Read for BridgeReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        match self.bridge.read(buf, self.wait).map_err(map_err)? {
            ReadOutcome::Read(n) => Ok(n),
            ReadOutcome::Eof => Ok(0),
        }
    }
}

impl Seek for BridgeReader {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(p) => {
                let p = i64::try_from(p).map_err(|_| {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "seek offset overflow")
                })?;
                (p, Whence::Start)
            }
            SeekFrom::Current(delta) => (delta, Whence::Current),
            SeekFrom::End(delta) => (delta, Whence::End),
        };

        match self.bridge.seek(offset, whence).map_err(map_err)? {
            SeekOutcome::At(n) => Ok(n),
            SeekOutcome::Miss { target } => Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("seek target {target} outside buffered window"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::ErrorKind, sync::Arc};

    use aulos_buffer::StreamId;
    use bytes::Bytes;

    use super::*;
    use crate::mock::MockTransport;

    fn reader_with(len: Option<u64>, data: &[u8]) -> BridgeReader {
        let bridge = StreamBridge::new(Arc::new(MockTransport::new(len)));
        bridge.deliver(StreamId(4), Bytes::copy_from_slice(data));
        BridgeReader::new(bridge).with_wait_mode(WaitMode::NonBlocking)
    }

    #[test]
    fn test_read_drains_and_hits_eof() {
        let mut reader = reader_with(Some(5), b"hello");

        let mut buf = [0u8; 3];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"hel");
        assert_eq!(reader.position(), 3);

        let mut rest = [0u8; 8];
        assert_eq!(reader.read(&mut rest).unwrap(), 2);
        assert_eq!(reader.read(&mut rest).unwrap(), 0);
    }

    #[test]
    fn test_empty_buf_reads_zero() {
        let mut reader = reader_with(Some(5), b"hello");
        let mut buf = [];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_len_and_position() {
        let reader = reader_with(Some(5), b"hello");
        assert_eq!(reader.len(), Some(5));
        assert!(!reader.is_empty());

        let unknown = reader_with(None, b"hello");
        assert_eq!(unknown.len(), None);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_seek_within_window() {
        let mut reader = reader_with(Some(100), b"0123456789");
        assert_eq!(reader.seek(SeekFrom::Start(4)).unwrap(), 4);

        let mut buf = [0u8; 2];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"45");
    }

    #[test]
    fn test_seek_miss_is_unsupported() {
        let mut reader = reader_with(Some(100), b"0123456789");
        let err = reader.seek(SeekFrom::Start(50)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_seek_end_unknown_length_is_unsupported() {
        let mut reader = reader_with(None, b"0123456789");
        let err = reader.seek(SeekFrom::End(-2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_negative_seek_is_invalid_input() {
        let mut reader = reader_with(Some(100), b"0123456789");
        let err = reader.seek(SeekFrom::Current(-1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
