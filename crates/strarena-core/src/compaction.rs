//! Compaction — eliminate the holes left behind by deletions
//!
//! Over time deletions and relocations leave the arena fragmented: plenty
//! of free units in total but no single gap large enough for a new record.
//! Compaction slides every record, in table order, down to the earliest
//! available offset. Afterwards the used region is `[0, used)` and the
//! free region is one contiguous run `[used, capacity)`.
//!
//! Record count, table order and therefore ordinals never change; only
//! offsets do.

use tracing::debug;

use crate::arena::Arena;
use crate::table::SlotTable;

/// Result of a compaction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionResult {
    /// Number of records whose offset changed
    pub records_moved: usize,
    /// Total units relocated
    pub units_moved: usize,
    /// Contiguous free units after compaction
    pub free: usize,
}

impl CompactionResult {
    /// True when the arena was already compact.
    pub fn was_noop(&self) -> bool {
        self.records_moved == 0
    }
}

/// Relocate every record to the earliest available offset.
///
/// Records are visited in ascending offset order, so each destination is
/// never above its source. Source cells are cleared as they are vacated.
pub fn compact(arena: &mut Arena, table: &mut SlotTable) -> CompactionResult {
    let mut dest = 0usize;
    let mut records_moved = 0usize;
    let mut units_moved = 0usize;

    for position in 0..table.len() {
        let slot = match table.get(position) {
            Some(slot) => *slot,
            None => break,
        };

        if slot.offset != dest {
            arena.move_range(slot.offset, dest, slot.len);
            table.set_offset(position, dest);
            records_moved += 1;
            units_moved += slot.len;
        }
        dest += slot.len;
    }

    debug_assert_eq!(dest, arena.used());

    let result = CompactionResult {
        records_moved,
        units_moved,
        free: arena.free(),
    };
    debug!(
        records = table.len(),
        records_moved = result.records_moved,
        units_moved = result.units_moved,
        free = result.free,
        "arena compacted"
    );
    result
}
