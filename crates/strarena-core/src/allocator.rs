//! Allocator — first-fit search for a gap that can hold a new record
//!
//! Gaps are examined in arena order: the leading gap before the first
//! record, each gap between consecutive records, then the trailing gap
//! after the last record. The first gap of at least `min_len` units wins.
//! If none is large enough the arena may be compacted once, after which
//! the search repeats with compaction disabled.

use tracing::trace;

use crate::arena::Arena;
use crate::compaction::compact;
use crate::error::{StoreError, StoreResult};
use crate::table::SlotTable;

/// Where a new record should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Arena offset of the gap
    pub offset: usize,
    /// Table position the new slot must be inserted at
    pub position: usize,
}

/// Scan the table for the first gap of at least `min_len` units.
///
/// The slot at `skip`, if any, is treated as already removed: its units
/// count as free and the returned position is an index into the table
/// with that slot taken out.
pub fn scan_gaps(
    table: &SlotTable,
    capacity: usize,
    min_len: usize,
    skip: Option<usize>,
) -> Option<Placement> {
    let mut cursor = 0usize;
    let mut position = 0usize;

    for (index, slot) in table.iter().enumerate() {
        if Some(index) == skip {
            continue;
        }
        if slot.offset - cursor >= min_len {
            return Some(Placement { offset: cursor, position });
        }
        cursor = slot.end();
        position += 1;
    }

    if capacity - cursor >= min_len {
        Some(Placement { offset: cursor, position })
    } else {
        None
    }
}

/// Find room for a record of `min_len` units.
///
/// Read-only unless no single gap fits and `allow_compact` is set, in
/// which case the arena is compacted once and searched again.
pub fn find_space(
    arena: &mut Arena,
    table: &mut SlotTable,
    min_len: usize,
    allow_compact: bool,
) -> StoreResult<Placement> {
    if min_len > arena.free() {
        return Err(StoreError::Full { requested: min_len, free: arena.free() });
    }

    if let Some(placement) = scan_gaps(table, arena.capacity(), min_len, None) {
        trace!(min_len, offset = placement.offset, position = placement.position, "gap found");
        return Ok(placement);
    }

    if allow_compact {
        trace!(min_len, free = arena.free(), "no single gap fits, compacting");
        compact(arena, table);
        return find_space(arena, table, min_len, false);
    }

    Err(StoreError::Full { requested: min_len, free: arena.free() })
}
