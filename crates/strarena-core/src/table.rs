//! Slot table: ordered offset/length records describing live strings
//!
//! Slots are kept sorted by ascending arena offset. A slot's position in
//! the table is the ordinal clients use to address it, so ordinals shift
//! whenever an earlier slot is inserted or removed.

use crate::config::MIN_RECORD_LEN;
use crate::error::{StoreError, StoreResult};

/// Location of one record inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// First unit of the record
    pub offset: usize,
    /// Units occupied, terminator included
    pub len: usize,
}

impl Slot {
    /// One past the last unit of the record.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Offset-ordered table of live records with a fixed maximum size.
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: Vec<Slot>,
    max_slots: usize,
}

impl SlotTable {
    /// Create an empty table that can describe at most `max_slots` records.
    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_slots),
            max_slots,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn get(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Shift every slot from `position` onward one place later and write
    /// `slot` into the hole.
    ///
    /// The caller guarantees `slot` sorts between its new neighbours.
    pub(crate) fn insert_at(&mut self, position: usize, slot: Slot) {
        debug_assert!(position <= self.slots.len());
        debug_assert!(self.slots.len() < self.max_slots);
        debug_assert!(position == 0 || self.slots[position - 1].end() <= slot.offset);
        debug_assert!(position == self.slots.len() || slot.end() <= self.slots[position].offset);
        self.slots.insert(position, slot);
    }

    /// Remove the slot at `position`, shifting later slots one place earlier.
    pub(crate) fn remove_at(&mut self, position: usize) -> Slot {
        self.slots.remove(position)
    }

    pub(crate) fn set_offset(&mut self, position: usize, offset: usize) {
        self.slots[position].offset = offset;
    }

    pub(crate) fn set_len(&mut self, position: usize, len: usize) {
        self.slots[position].len = len;
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Check ordering, bounds and minimum lengths against an arena of
    /// `capacity` units. Returns the summed record lengths.
    pub fn check(&self, capacity: usize) -> StoreResult<usize> {
        if self.slots.len() > self.max_slots {
            return Err(StoreError::InvariantViolation {
                position: self.slots.len(),
                reason: format!("{} slots exceed maximum {}", self.slots.len(), self.max_slots),
            });
        }

        let mut prev_end = 0usize;
        let mut total = 0usize;
        for (position, slot) in self.slots.iter().enumerate() {
            if slot.len < MIN_RECORD_LEN {
                return Err(StoreError::InvariantViolation {
                    position,
                    reason: format!("length {} below minimum {}", slot.len, MIN_RECORD_LEN),
                });
            }
            if slot.offset < prev_end {
                return Err(StoreError::InvariantViolation {
                    position,
                    reason: format!("offset {} overlaps previous record ending at {}", slot.offset, prev_end),
                });
            }
            if slot.end() > capacity {
                return Err(StoreError::InvariantViolation {
                    position,
                    reason: format!("record ends at {} beyond capacity {}", slot.end(), capacity),
                });
            }
            prev_end = slot.end();
            total += slot.len;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(offset: usize, len: usize) -> Slot {
        Slot { offset, len }
    }

    #[test]
    fn test_insert_shifts_tail() {
        let mut table = SlotTable::new(8);
        table.insert_at(0, slot(0, 4));
        table.insert_at(1, slot(10, 3));
        table.insert_at(1, slot(4, 6));

        let offsets: Vec<usize> = table.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 4, 10]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_remove_shifts_tail() {
        let mut table = SlotTable::new(8);
        table.insert_at(0, slot(0, 4));
        table.insert_at(1, slot(4, 6));
        table.insert_at(2, slot(10, 3));

        let removed = table.remove_at(0);
        assert_eq!(removed, slot(0, 4));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0), Some(&slot(4, 6)));
        assert_eq!(table.get(1), Some(&slot(10, 3)));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn test_check_sums_lengths() {
        let mut table = SlotTable::new(8);
        table.insert_at(0, slot(0, 4));
        table.insert_at(1, slot(6, 3));
        assert_eq!(table.check(30).unwrap(), 7);
    }

    #[test]
    fn test_check_detects_overlap() {
        let mut table = SlotTable::new(8);
        table.insert_at(0, slot(0, 4));
        table.insert_at(1, slot(6, 3));
        table.set_offset(1, 2);

        match table.check(30) {
            Err(StoreError::InvariantViolation { position, .. }) => assert_eq!(position, 1),
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_detects_out_of_bounds() {
        let mut table = SlotTable::new(8);
        table.insert_at(0, slot(0, 4));
        table.set_offset(0, 28);
        assert!(table.check(30).is_err());
    }

    #[test]
    fn test_check_detects_short_record() {
        let mut table = SlotTable::new(8);
        table.insert_at(0, slot(0, 4));
        table.set_len(0, 1);
        assert!(table.check(30).is_err());
    }
}
