//! Arena — the fixed-capacity buffer that owns every record's bytes
//!
//! The arena never grows. Records live at offsets handed out by the
//! allocator; each record is its content followed by one zero terminator
//! unit. Cells outside any live record are kept zeroed.

use crate::table::Slot;

/// Logical terminator written after every record's content
pub const TERMINATOR: u8 = 0;

/// Fixed-capacity storage for record payloads.
#[derive(Debug, Clone)]
pub struct Arena {
    /// Raw storage units, length == capacity
    buf: Box<[u8]>,
    /// Units currently owned by live records
    used: usize,
}

impl Arena {
    /// Create a zeroed arena of `capacity` units.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![TERMINATOR; capacity].into_boxed_slice(),
            used: 0,
        }
    }

    /// Total units, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Units owned by live records.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Units not owned by any record (not necessarily contiguous).
    pub fn free(&self) -> usize {
        self.buf.len() - self.used
    }

    /// Raw view of every unit, free cells included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Content of a record, terminator excluded.
    pub fn content(&self, slot: &Slot) -> &[u8] {
        &self.buf[slot.offset..slot.end() - 1]
    }

    /// Account `len` units as owned by a new record.
    pub(crate) fn reserve(&mut self, len: usize) {
        debug_assert!(self.used + len <= self.buf.len());
        self.used += len;
    }

    /// Return `len` units to the free pool.
    pub(crate) fn release(&mut self, len: usize) {
        debug_assert!(len <= self.used);
        self.used -= len;
    }

    /// Zero-fill `content.len() + 1` units at `offset`, then copy `content` in.
    ///
    /// The final unit stays zero and acts as the terminator.
    pub(crate) fn write(&mut self, offset: usize, content: &[u8]) {
        let len = content.len() + 1;
        self.clear(offset, len);
        self.buf[offset..offset + content.len()].copy_from_slice(content);
    }

    /// Zero `len` units starting at `offset`.
    pub(crate) fn clear(&mut self, offset: usize, len: usize) {
        self.buf[offset..offset + len].fill(TERMINATOR);
    }

    /// Zero the whole arena and forget all ownership.
    pub(crate) fn reset(&mut self) {
        self.buf.fill(TERMINATOR);
        self.used = 0;
    }

    #[cfg(test)]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Relocate `len` units from `src` to `dst`, clearing source cells as
    /// they are vacated.
    ///
    /// When the destination lies above the source and the ranges overlap,
    /// the copy runs from the high end down so that no source unit is
    /// overwritten before it has been read. Otherwise it runs forward.
    pub(crate) fn move_range(&mut self, src: usize, dst: usize, len: usize) {
        if src == dst || len == 0 {
            return;
        }
        debug_assert!(src + len <= self.buf.len());
        debug_assert!(dst + len <= self.buf.len());

        if src < dst && dst < src + len {
            for i in (0..len).rev() {
                self.buf[dst + i] = self.buf[src + i];
                self.buf[src + i] = TERMINATOR;
            }
        } else {
            for i in 0..len {
                self.buf[dst + i] = self.buf[src + i];
                self.buf[src + i] = TERMINATOR;
            }
        }
    }
}
