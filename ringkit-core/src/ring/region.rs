// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! MirroredRegion - one shared memory object mapped twice, back to back.
//!
//! The region spans `2 * len` bytes of virtual address space. Both halves map
//! the same backing object at offset 0, so a byte at `ptr + i` and a byte at
//! `ptr + len + i` are the same physical byte. A linear copy that starts in
//! the first half and runs past `len` therefore lands at the start of the
//! buffer, which is exactly a wrapped copy.
//!
//! All unsafe mapping calls are encapsulated here.

use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use std::ptr::NonNull;

use crate::error::RingError;

/// Query the platform page size.
pub fn page_size() -> Result<usize, RingError> {
    // SAFETY: sysconf has no memory safety preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size <= 0 {
        return Err(RingError::AllocationFailure {
            requested: 0,
            reason: format!("sysconf(_SC_PAGESIZE) failed: {}", io::Error::last_os_error()),
        });
    }
    Ok(size as usize)
}

/// A virtual memory span whose second half aliases its first half.
///
/// This struct owns the whole span and unmaps it as a single unit on drop.
pub struct MirroredRegion {
    /// Start of the reservation.
    ptr: NonNull<u8>,
    /// Length of one half in bytes (a page multiple).
    len: usize,
}

// SAFETY: MirroredRegion exclusively owns its mapping; no other handle to the
// pages exists once the backing descriptor is closed.
unsafe impl Send for MirroredRegion {}

// SAFETY: Shared references only allow reads. Writing goes through
// `as_mut_ptr`, which requires `&mut self`.
unsafe impl Sync for MirroredRegion {}

impl MirroredRegion {
    /// Create a mirrored region whose halves are `len` bytes each.
    ///
    /// # Errors
    /// - `InvalidArgument` if `len` is zero or not a multiple of the page size.
    /// - `AllocationFailure` if the backing object or the reservation cannot be created.
    /// - `MappingFailure` if either half cannot be mapped. The reservation is
    ///   released before the error is returned.
    pub fn new(len: usize) -> Result<Self, RingError> {
        let page = page_size()?;
        if len == 0 || len % page != 0 {
            return Err(RingError::InvalidArgument {
                reason: format!("Region length {} is not a non-zero multiple of page size {}", len, page),
            });
        }

        let total = len.checked_mul(2).ok_or_else(|| RingError::InvalidArgument {
            reason: format!("Region length {} overflows when doubled", len),
        })?;

        let backing = open_backing_object().map_err(|e| RingError::AllocationFailure {
            requested: len,
            reason: format!("Failed to create backing object: {}", e),
        })?;

        backing
            .set_len(len as u64)
            .map_err(|e| RingError::AllocationFailure {
                requested: len,
                reason: format!("ftruncate failed: {}", e),
            })?;

        // Reserve the full span first so both halves land back to back.
        // SAFETY: anonymous PROT_NONE mapping with a kernel-chosen address.
        let base = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                total,
                libc::PROT_NONE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if base == libc::MAP_FAILED {
            return Err(RingError::AllocationFailure {
                requested: total,
                reason: format!("Address space reservation failed: {}", io::Error::last_os_error()),
            });
        }

        let ptr = NonNull::new(base as *mut u8).ok_or_else(|| RingError::AllocationFailure {
            requested: total,
            reason: "mmap returned null".to_string(),
        })?;

        // From here on, dropping `region` releases the whole reservation.
        let region = Self { ptr, len };
        region.map_half(0, &backing)?;
        region.map_half(len, &backing)?;

        tracing::debug!(len = len, total = total, "Created mirrored region");

        Ok(region)
    }

    /// Map the backing object over `[offset, offset + len)` of the reservation.
    fn map_half(&self, offset: usize, backing: &File) -> Result<(), RingError> {
        // SAFETY: offset is 0 or len, so the target range lies inside the
        // 2 * len reservation owned by self. MAP_FIXED only replaces our own pages.
        let mapped = unsafe {
            libc::mmap(
                self.ptr.as_ptr().add(offset) as *mut libc::c_void,
                self.len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED | libc::MAP_FIXED,
                backing.as_raw_fd(),
                0,
            )
        };

        if mapped == libc::MAP_FAILED {
            return Err(RingError::MappingFailure {
                reason: format!(
                    "mmap of half at offset {} failed: {}",
                    offset,
                    io::Error::last_os_error()
                ),
            });
        }

        Ok(())
    }

    /// Length of one half in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Start of the span. Valid for reads of up to `2 * len` bytes.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Start of the span. Valid for writes of up to `2 * len` bytes.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl Drop for MirroredRegion {
    fn drop(&mut self) {
        // SAFETY: ptr and 2 * len describe exactly the reservation made in new().
        let result = unsafe { libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.len * 2) };
        if result < 0 {
            tracing::error!(
                len = self.len,
                error = %io::Error::last_os_error(),
                "Failed to unmap mirrored region"
            );
        }
    }
}

/// Anonymous memory file, never visible in the filesystem.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn open_backing_object() -> io::Result<File> {
    use std::os::fd::{FromRawFd, OwnedFd};

    const NAME: &[u8] = b"ringkit-mirror\0";

    // SAFETY: NAME is NUL-terminated and outlives the call.
    let fd = unsafe { libc::memfd_create(NAME.as_ptr() as *const libc::c_char, libc::MFD_CLOEXEC) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: fd was just returned by memfd_create and has no other owner.
    let owned = unsafe { OwnedFd::from_raw_fd(fd) };
    Ok(File::from(owned))
}

/// Already-unlinked temporary file on platforms without memfd.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn open_backing_object() -> io::Result<File> {
    tempfile::tempfile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        let page = page_size().unwrap();
        assert!(page.is_power_of_two());
    }

    #[test]
    fn test_region_rejects_unaligned_length() {
        let page = page_size().unwrap();
        assert!(matches!(
            MirroredRegion::new(0),
            Err(RingError::InvalidArgument { .. })
        ));
        assert!(matches!(
            MirroredRegion::new(page + 1),
            Err(RingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_second_half_aliases_first() {
        let page = page_size().unwrap();
        let mut region = MirroredRegion::new(page).unwrap();
        assert_eq!(region.len(), page);

        // Volatile so the compiler cannot reorder accesses it believes are disjoint.
        // SAFETY: both offsets are inside the 2 * page span.
        unsafe {
            let base = region.as_mut_ptr();
            base.add(page + 7).write_volatile(0x5A);
            assert_eq!(base.add(7).read_volatile(), 0x5A);

            base.add(3).write_volatile(0xC3);
            assert_eq!(region.as_ptr().add(page + 3).read_volatile(), 0xC3);
        }
    }

    #[test]
    fn test_failed_half_mapping_reports_error_and_keeps_region() {
        let page = page_size().unwrap();
        let mut region = MirroredRegion::new(page).unwrap();

        // A shared writable mapping cannot be made from a read-only descriptor.
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(page as u64).unwrap();
        let read_only = File::open(file.path()).unwrap();

        let err = region.map_half(page, &read_only).unwrap_err();
        assert!(matches!(err, RingError::MappingFailure { .. }));

        // The existing halves are untouched and still alias.
        // SAFETY: both offsets are inside the 2 * page span.
        unsafe {
            let base = region.as_mut_ptr();
            base.add(11).write_volatile(0x77);
            assert_eq!(base.add(page + 11).read_volatile(), 0x77);
        }

        // Dropping after the failure releases the whole span.
        drop(region);
    }

    #[test]
    fn test_region_starts_zeroed() {
        let page = page_size().unwrap();
        let region = MirroredRegion::new(page * 2).unwrap();

        // SAFETY: the span is 4 pages long and readable.
        let bytes = unsafe { std::slice::from_raw_parts(region.as_ptr(), page * 4) };
        assert!(bytes.iter().all(|&b| b == 0));
    }
}
