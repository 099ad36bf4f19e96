// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Modulo-indexed ring buffer over a heap allocation.
//!
//! Storage holds `length + 1` slots; one slot is never filled so that
//! `start == end` always means empty. Writes only ever use the contiguous room
//! between `end` and the physical end of storage, so every write and read is a
//! single linear copy. When the buffer drains completely both cursors snap back
//! to 0, which recovers the full contiguous room for the next write.

use crate::error::RingError;

/// Bounded ring buffer with all-or-nothing reads and writes.
pub struct BoundedRingBuffer {
    /// Exclusively owned storage of `capacity + 1` bytes.
    storage: Box<[u8]>,
    /// Index of the oldest unread byte.
    start: usize,
    /// Index where the next byte is written. Always `>= start`.
    end: usize,
}

impl BoundedRingBuffer {
    /// Create a buffer that holds up to `length` bytes.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero length, `AllocationFailure` if the storage
    /// cannot be reserved.
    pub fn new(length: usize) -> Result<Self, RingError> {
        if length == 0 {
            return Err(RingError::InvalidArgument {
                reason: "Buffer length must be greater than 0".to_string(),
            });
        }

        let slots = length.checked_add(1).ok_or_else(|| RingError::InvalidArgument {
            reason: format!("Buffer length {} is too large", length),
        })?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(slots)
            .map_err(|e| RingError::AllocationFailure {
                requested: slots,
                reason: e.to_string(),
            })?;
        storage.resize(slots, 0);

        tracing::debug!(capacity = length, slots = slots, "Created bounded ring buffer");

        Ok(Self {
            storage: storage.into_boxed_slice(),
            start: 0,
            end: 0,
        })
    }

    /// Number of slots in storage, one more than the usable capacity.
    fn slots(&self) -> usize {
        self.storage.len()
    }

    /// Usable capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.slots() - 1
    }

    /// Bytes currently stored.
    #[inline]
    pub fn available_data(&self) -> usize {
        (self.end + self.slots() - self.start) % self.slots()
    }

    /// Contiguous room between `end` and the physical end of storage.
    ///
    /// This does not count bytes already consumed in front of `start`; that
    /// room only comes back once the buffer drains and the cursors reset.
    #[inline]
    pub fn available_space(&self) -> usize {
        self.slots() - self.end - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when a one-byte write would be rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        !self.is_empty() && self.available_space() == 0
    }

    /// Append all of `data` or nothing.
    ///
    /// Returns `data.len()` on success. Fails with `InsufficientSpace` when
    /// `data` does not fit in `available_space()`, leaving the buffer unchanged.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, RingError> {
        if data.is_empty() {
            return Err(RingError::InvalidArgument {
                reason: "Length must be greater than 0".to_string(),
            });
        }

        if self.is_empty() {
            self.start = 0;
            self.end = 0;
        }

        let available = self.available_space();
        if data.len() > available {
            tracing::debug!(requested = data.len(), available = available, "Write rejected");
            return Err(RingError::InsufficientSpace {
                requested: data.len(),
                available,
            });
        }

        self.storage[self.end..self.end + data.len()].copy_from_slice(data);
        self.commit_write(data.len());

        Ok(data.len())
    }

    /// Fill all of `target` or nothing.
    ///
    /// Returns `target.len()` on success. Fails with `InsufficientData` when
    /// fewer than `target.len()` bytes are stored.
    pub fn read(&mut self, target: &mut [u8]) -> Result<usize, RingError> {
        let amount = target.len();
        self.check_readable(amount)?;

        target.copy_from_slice(&self.storage[self.start..self.start + amount]);
        self.commit_read(amount);

        Ok(amount)
    }

    /// Read `amount` bytes into a new vector.
    pub fn read_to_vec(&mut self, amount: usize) -> Result<Vec<u8>, RingError> {
        self.check_readable(amount)?;

        let bytes = self.storage[self.start..self.start + amount].to_vec();
        self.commit_read(amount);

        Ok(bytes)
    }

    /// Drain everything stored. An empty buffer yields an empty vector.
    pub fn read_all(&mut self) -> Vec<u8> {
        let bytes = self.peek().to_vec();
        self.commit_read(bytes.len());
        bytes
    }

    /// Borrow the stored bytes without consuming them.
    pub fn peek(&self) -> &[u8] {
        &self.storage[self.start..self.end]
    }

    /// Discard `amount` stored bytes, as `read` does, without copying them out.
    pub fn consume(&mut self, amount: usize) -> Result<usize, RingError> {
        self.check_readable(amount)?;
        self.commit_read(amount);
        Ok(amount)
    }

    fn check_readable(&self, amount: usize) -> Result<(), RingError> {
        if amount == 0 {
            return Err(RingError::InvalidArgument {
                reason: "Amount must be greater than 0".to_string(),
            });
        }

        let available = self.available_data();
        if amount > available {
            tracing::debug!(requested = amount, available = available, "Read rejected");
            return Err(RingError::InsufficientData {
                requested: amount,
                available,
            });
        }

        Ok(())
    }

    fn commit_write(&mut self, amount: usize) {
        self.end = (self.end + amount) % self.slots();
    }

    fn commit_read(&mut self, amount: usize) {
        self.start = (self.start + amount) % self.slots();
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }
}

impl std::fmt::Debug for BoundedRingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedRingBuffer")
            .field("capacity", &self.capacity())
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUFFER_SIZE: usize = 10;

    #[test]
    fn test_create() {
        let buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        assert_eq!(buffer.capacity(), BUFFER_SIZE);
        assert_eq!(buffer.available_data(), 0);
        assert_eq!(buffer.available_space(), BUFFER_SIZE);
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
    }

    #[test]
    fn test_create_zero_length() {
        assert!(matches!(
            BoundedRingBuffer::new(0),
            Err(RingError::InvalidArgument { .. })
        ));
        assert!(BoundedRingBuffer::new(usize::MAX).is_err());
    }

    #[test]
    fn test_write_read() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();

        assert_eq!(buffer.write(b"hello").unwrap(), 5);
        assert_eq!(buffer.available_data(), 5);
        assert_eq!(buffer.available_space(), BUFFER_SIZE - 5);

        let mut out = [0u8; 5];
        assert_eq!(buffer.read(&mut out).unwrap(), 5);
        assert_eq!(&out, b"hello");
        assert_eq!(buffer.available_data(), 0);
        assert_eq!(buffer.available_space(), BUFFER_SIZE);
    }

    #[test]
    fn test_overflow_rejected() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();

        let err = buffer.write(&[b'A'; 12]).unwrap_err();
        assert_eq!(
            err,
            RingError::InsufficientSpace {
                requested: 12,
                available: BUFFER_SIZE
            }
        );
        assert_eq!(buffer.available_data(), 0);
    }

    #[test]
    fn test_failed_write_keeps_data() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        buffer.write(b"abcdef").unwrap();

        assert!(buffer.write(b"ghijk").is_err());
        assert_eq!(buffer.peek(), b"abcdef");
    }

    #[test]
    fn test_empty_arguments_rejected() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        assert!(matches!(
            buffer.write(&[]),
            Err(RingError::InvalidArgument { .. })
        ));
        assert!(matches!(
            buffer.read(&mut []),
            Err(RingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_read_more_than_stored() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        buffer.write(b"abc").unwrap();

        let mut out = [0u8; 4];
        assert_eq!(
            buffer.read(&mut out).unwrap_err(),
            RingError::InsufficientData {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(buffer.available_data(), 3);
    }

    #[test]
    fn test_space_is_not_wrap_aware() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        buffer.write(b"0123456789").unwrap();

        let mut out = [0u8; 8];
        buffer.read(&mut out).unwrap();

        // Eight bytes are free in total, but none of it is past `end`.
        assert_eq!(buffer.available_data(), 2);
        assert_eq!(buffer.available_space(), 0);
        assert!(buffer.is_full());
        assert!(buffer.write(b"x").is_err());
    }

    #[test]
    fn test_drain_resets_cursors() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        buffer.write(b"12345").unwrap();

        let mut out = [0u8; 5];
        buffer.read(&mut out).unwrap();

        // A full-capacity write fits in one piece right after a full drain.
        assert_eq!(buffer.write(&[7u8; BUFFER_SIZE]).unwrap(), BUFFER_SIZE);
        assert!(buffer.is_full());
        assert_eq!(buffer.peek(), &[7u8; BUFFER_SIZE]);
    }

    #[test]
    fn test_wraparound() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        let mut out = [0u8; 5];

        buffer.write(b"12345").unwrap();
        buffer.read(&mut out).unwrap();
        buffer.write(b"67890").unwrap();
        buffer.read(&mut out).unwrap();

        assert_eq!(&out, b"67890");
    }

    #[test]
    fn test_read_to_vec() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        buffer.write(b"testgets").unwrap();

        let bytes = buffer.read_to_vec(8).unwrap();
        assert_eq!(bytes, b"testgets");
        assert_eq!(buffer.available_data(), 0);
        assert!(buffer.read_to_vec(1).is_err());
    }

    #[test]
    fn test_read_all_and_consume() {
        let mut buffer = BoundedRingBuffer::new(BUFFER_SIZE).unwrap();
        assert!(buffer.read_all().is_empty());

        buffer.write(b"headbody").unwrap();
        assert_eq!(buffer.consume(4).unwrap(), 4);
        assert_eq!(buffer.peek(), b"body");
        assert_eq!(buffer.read_all(), b"body");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_full_and_empty_are_exclusive() {
        let mut buffer = BoundedRingBuffer::new(1).unwrap();
        assert!(buffer.is_empty() && !buffer.is_full());

        buffer.write(b"z").unwrap();
        assert!(buffer.is_full() && !buffer.is_empty());
    }
}
