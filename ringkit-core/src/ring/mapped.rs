// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Virtual memory ring buffer backed by a [`MirroredRegion`].
//!
//! Capacity is rounded up to whole pages. Because the second half of the
//! region aliases the first, a copy that starts at `end` (or `start`) and runs
//! past the logical end of the buffer is still a single `memcpy`; there is no
//! "copy to the end, then copy the rest from 0" branch on either path.
//!
//! Reads and writes never fail: they serve as much as fits and report how much
//! that was.

use crate::error::RingError;
use crate::ring::region::{page_size, MirroredRegion};

/// Page-granular ring buffer with truncating reads and writes.
pub struct MappedRingBuffer {
    region: MirroredRegion,
    /// Read cursor in `[0, mapped_len)`.
    start: usize,
    /// Write cursor in `[0, mapped_len)`.
    end: usize,
}

impl MappedRingBuffer {
    /// Create a buffer holding at least `length` bytes.
    ///
    /// The mapped length is `length + 1` rounded up to the page size, and the
    /// usable capacity is one less than that.
    pub fn new(length: usize) -> Result<Self, RingError> {
        if length == 0 {
            return Err(RingError::InvalidArgument {
                reason: "Buffer length must be greater than 0".to_string(),
            });
        }

        let page = page_size()?;
        let mapped_len = Self::mapped_len_for(length, page).ok_or_else(|| {
            RingError::InvalidArgument {
                reason: format!("Buffer length {} is too large", length),
            }
        })?;

        let region = MirroredRegion::new(mapped_len)?;

        tracing::debug!(
            requested = length,
            mapped_len = mapped_len,
            page_size = page,
            "Created mapped ring buffer"
        );

        Ok(Self {
            region,
            start: 0,
            end: 0,
        })
    }

    /// Mapped length for a requested capacity: one disambiguation byte added,
    /// then rounded up to a page multiple.
    pub fn mapped_len_for(length: usize, page_size: usize) -> Option<usize> {
        let needed = length.checked_add(1)?;
        let pages = needed.div_ceil(page_size);
        pages.checked_mul(page_size)
    }

    /// Length of one half of the mapping.
    #[inline]
    pub fn mapped_len(&self) -> usize {
        self.region.len()
    }

    /// Usable capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.mapped_len() - 1
    }

    #[inline]
    pub fn available_space(&self) -> usize {
        let len = self.mapped_len();
        (len + self.start - self.end - 1) % len
    }

    #[inline]
    pub fn available_data(&self) -> usize {
        let len = self.mapped_len();
        (len + self.end - self.start) % len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        (self.end + 1) % self.mapped_len() == self.start
    }

    /// Append as much of `data` as fits. Returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let amount = data.len().min(self.available_space());
        if amount == 0 {
            return 0;
        }

        // SAFETY: end < mapped_len and amount < mapped_len, so the destination
        // range ends inside the 2 * mapped_len span. Past mapped_len it lands
        // on the mirror of the buffer start, which holds no unread data
        // because amount <= available_space.
        unsafe {
            std::ptr::copy_nonoverlapping(
                data.as_ptr(),
                self.region.as_mut_ptr().add(self.end),
                amount,
            );
        }

        self.end = (self.end + amount) % self.mapped_len();
        amount
    }

    /// Fill `target` with as many stored bytes as available. Returns the count.
    pub fn read(&mut self, target: &mut [u8]) -> usize {
        let amount = target.len().min(self.available_data());
        if amount == 0 {
            return 0;
        }

        target[..amount].copy_from_slice(&self.peek()[..amount]);
        self.start = (self.start + amount) % self.mapped_len();
        amount
    }

    /// Read up to `amount` bytes into a new vector.
    pub fn read_to_vec(&mut self, amount: usize) -> Vec<u8> {
        let amount = amount.min(self.available_data());
        let bytes = self.peek()[..amount].to_vec();
        self.consume(amount);
        bytes
    }

    /// Borrow all stored bytes as one contiguous slice, even when they wrap.
    pub fn peek(&self) -> &[u8] {
        // SAFETY: start < mapped_len and available_data < mapped_len, so the
        // range lies inside the readable 2 * mapped_len span.
        unsafe {
            std::slice::from_raw_parts(self.region.as_ptr().add(self.start), self.available_data())
        }
    }

    /// Discard up to `amount` stored bytes. Returns the number discarded.
    pub fn consume(&mut self, amount: usize) -> usize {
        let amount = amount.min(self.available_data());
        self.start = (self.start + amount) % self.mapped_len();
        amount
    }
}

impl std::fmt::Debug for MappedRingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedRingBuffer")
            .field("mapped_len", &self.mapped_len())
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}
