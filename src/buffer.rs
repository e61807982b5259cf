//! A zero-initialized output region that grows geometrically when the codec
//! runs out of room.

use crate::error::{Error, Result};
use crate::status::Status;

/// Computes the capacity that follows 'old' in the growth sequence:
/// max(floor(old * 1.5), old + 1). Returns None on overflow.
pub fn next_capacity(old: usize) -> Option<usize> {
    let scaled = old.checked_add(old / 2)?;
    let bumped = old.checked_add(1)?;
    Some(scaled.max(bumped))
}

/// The buffer that the driver writes codec output into. The buffer is owned
/// by the caller of the driver, and the driver only borrows it, so it is
/// released exactly once whether the drive succeeds or fails.
#[derive(Debug)]
pub struct OutputBuffer {
    /// The bytes. The length of the vector is the logical capacity.
    data: Vec<u8>,
    /// Number of times the buffer was grown.
    growth_cycles: usize,
    /// The capacity requested by the last growth that failed.
    failed_growth: Option<usize>,
}

impl OutputBuffer {
    /// Allocates a zeroed buffer of 'size' bytes.
    pub fn new(size: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| Error::OutOfMemory { requested: size })?;
        data.resize(size, 0);
        Ok(Self {
            data,
            growth_cycles: 0,
            failed_growth: None,
        })
    }

    /// Returns the logical capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn growth_cycles(&self) -> usize {
        self.growth_cycles
    }

    /// Returns the capacity that the last failed growth asked for, if a
    /// growth has failed.
    pub fn failed_growth(&self) -> Option<usize> {
        self.failed_growth
    }

    /// Grows the buffer to the next capacity in the sequence, keeping the
    /// existing bytes. On failure the buffer is left as it was and
    /// 'Status::MemError' is returned.
    pub fn grow(&mut self) -> std::result::Result<usize, Status> {
        let old = self.capacity();
        let new = match next_capacity(old) {
            Some(new) if self.data.try_reserve_exact(new - old).is_ok() => new,
            requested => {
                self.failed_growth = Some(requested.unwrap_or(usize::MAX));
                return Err(Status::MemError);
            }
        };
        self.data.resize(new, 0);
        self.growth_cycles += 1;
        Ok(new)
    }

    /// Returns the writable region that starts at 'offset'.
    pub fn tail_mut(&mut self, offset: usize) -> &mut [u8] {
        &mut self.data[offset..]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copies the first 'len' bytes into a new, exactly sized vector.
    pub fn to_exact(&self, len: u64) -> Result<Vec<u8>> {
        let capacity = self.capacity();
        let len = match usize::try_from(len) {
            Ok(len) if len <= capacity => len,
            _ => {
                return Err(Error::Overrun {
                    reported: len,
                    capacity,
                })
            }
        };
        let mut out = Vec::new();
        out.try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { requested: len })?;
        out.extend_from_slice(&self.data[..len]);
        Ok(out)
    }
}
