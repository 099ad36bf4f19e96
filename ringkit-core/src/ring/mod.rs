// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Byte ring buffers.
//!
//! Two implementations of one contract:
//! - [`BoundedRingBuffer`]: heap storage, all-or-nothing reads and writes.
//! - [`MappedRingBuffer`]: double-mapped virtual memory, truncating reads and writes.
//!
//! Neither synchronizes access. Wrap an instance in a mutex, or keep it on one
//! thread, when producers and consumers run concurrently.

mod bounded;
mod mapped;
mod region;

pub use bounded::BoundedRingBuffer;
pub use mapped::MappedRingBuffer;
pub use region::{page_size, MirroredRegion};

use crate::error::RingError;

/// Operations shared by both ring buffers, so callers can be generic over them.
pub trait ByteRing {
    /// Usable capacity in bytes.
    fn capacity(&self) -> usize;

    /// Bytes currently stored.
    fn available_data(&self) -> usize;

    /// Bytes the next write may accept.
    fn available_space(&self) -> usize;

    fn is_empty(&self) -> bool;

    fn is_full(&self) -> bool;

    /// Write bytes and return how many were stored.
    fn write(&mut self, data: &[u8]) -> Result<usize, RingError>;

    /// Read into `target` and return how many bytes were copied.
    fn read(&mut self, target: &mut [u8]) -> Result<usize, RingError>;
}

impl ByteRing for BoundedRingBuffer {
    fn capacity(&self) -> usize {
        BoundedRingBuffer::capacity(self)
    }

    fn available_data(&self) -> usize {
        BoundedRingBuffer::available_data(self)
    }

    fn available_space(&self) -> usize {
        BoundedRingBuffer::available_space(self)
    }

    fn is_empty(&self) -> bool {
        BoundedRingBuffer::is_empty(self)
    }

    fn is_full(&self) -> bool {
        BoundedRingBuffer::is_full(self)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, RingError> {
        BoundedRingBuffer::write(self, data)
    }

    fn read(&mut self, target: &mut [u8]) -> Result<usize, RingError> {
        BoundedRingBuffer::read(self, target)
    }
}

/// Never returns `Err`: short writes and reads are reported through the count.
impl ByteRing for MappedRingBuffer {
    fn capacity(&self) -> usize {
        MappedRingBuffer::capacity(self)
    }

    fn available_data(&self) -> usize {
        MappedRingBuffer::available_data(self)
    }

    fn available_space(&self) -> usize {
        MappedRingBuffer::available_space(self)
    }

    fn is_empty(&self) -> bool {
        MappedRingBuffer::is_empty(self)
    }

    fn is_full(&self) -> bool {
        MappedRingBuffer::is_full(self)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, RingError> {
        Ok(MappedRingBuffer::write(self, data))
    }

    fn read(&mut self, target: &mut [u8]) -> Result<usize, RingError> {
        Ok(MappedRingBuffer::read(self, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_and_drain<R: ByteRing>(ring: &mut R, payload: &[u8]) -> Vec<u8> {
        assert_eq!(ring.write(payload).unwrap(), payload.len());
        assert_eq!(ring.available_data() + ring.available_space(), ring.capacity());

        let mut out = vec![0u8; payload.len()];
        assert_eq!(ring.read(&mut out).unwrap(), payload.len());
        assert!(ring.is_empty());
        out
    }

    #[test]
    fn test_generic_over_both_buffers() {
        let mut bounded = BoundedRingBuffer::new(64).unwrap();
        let mut mapped = MappedRingBuffer::new(64).unwrap();

        assert_eq!(fill_and_drain(&mut bounded, b"same contract"), b"same contract");
        assert_eq!(fill_and_drain(&mut mapped, b"same contract"), b"same contract");
    }

    #[test]
    fn test_trait_objects() {
        let mut rings: Vec<Box<dyn ByteRing>> = vec![
            Box::new(BoundedRingBuffer::new(16).unwrap()),
            Box::new(MappedRingBuffer::new(16).unwrap()),
        ];

        for ring in rings.iter_mut() {
            assert!(ring.capacity() >= 16);
            assert!(!ring.is_full());
            ring.write(b"x").unwrap();
            assert!(!ring.is_empty());
        }
    }
}
