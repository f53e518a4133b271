//! Core string store — the heart of StrArena.
//!
//! StringStore combines a fixed-capacity arena, an offset-ordered slot
//! table and a first-fit allocator with on-demand compaction.
//!
//! **Ordinals are positions, not identities.** A record's ordinal is its
//! index in the slot table. Storing a record that lands in an earlier gap,
//! or deleting an earlier record, shifts the ordinals of everything after
//! it. Never hold an ordinal across a mutating call and expect it to name
//! the same record.
//!
//! **Read path**: ordinal lookup is O(1); content search is a linear scan
//! **Write path**: allocator picks a gap, bytes are written, then the slot
//! is inserted in offset order

use tracing::debug;

use crate::allocator::{find_space, scan_gaps, Placement};
use crate::arena::{Arena, TERMINATOR};
use crate::compaction::compact;
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::query::{contains, exact_match, Hit, Match, QueryResult};
use crate::table::{Slot, SlotTable};

/// A live record returned by ordinal lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Stored content, terminator excluded
    pub content: &'a [u8],
    /// Units occupied, terminator included
    pub len: usize,
}

/// Outcome of altering the next record that matched some content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Altered {
    /// Ordinal of the matched record before alteration
    pub source: usize,
    /// Ordinal of the record holding the new content
    pub ordinal: usize,
}

/// Fixed-capacity string store addressed by ordinal.
///
/// Single owner, no internal locking. Wrap in [`crate::SharedStore`] to
/// share across threads.
#[derive(Debug, Clone)]
pub struct StringStore {
    /// Payload bytes for every record
    arena: Arena,
    /// Offset-ordered record locations
    table: SlotTable,
    /// Hits of the most recent multi-match query
    scratch: Vec<Hit>,
    /// Store configuration
    config: Config,
}

impl StringStore {
    /// Create an empty store with the given configuration.
    pub fn open(config: Config) -> StoreResult<Self> {
        config.validate()?;

        let max_records = config.max_records();
        Ok(Self {
            arena: Arena::new(config.capacity),
            table: SlotTable::new(max_records),
            scratch: Vec::with_capacity(max_records),
            config,
        })
    }

    /// Create an empty store of `capacity` units with default policy.
    pub fn with_capacity(capacity: usize) -> StoreResult<Self> {
        Self::open(Config::with_capacity(capacity))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop every record and zero the arena.
    pub fn clear(&mut self) {
        debug!(records = self.table.len(), used = self.arena.used(), "clearing store");
        self.arena.reset();
        self.table.clear();
        self.scratch.clear();
    }

    /// Arena capacity in units.
    pub fn total_size(&self) -> usize {
        self.arena.capacity()
    }

    /// Units owned by live records, terminators included.
    pub fn used_size(&self) -> usize {
        self.arena.used()
    }

    /// Units not owned by any record. May be fragmented.
    pub fn free_size(&self) -> usize {
        self.arena.free()
    }

    /// Number of live records.
    pub fn count(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw arena contents, free cells included.
    pub fn arena(&self) -> &[u8] {
        self.arena.as_bytes()
    }

    /// Record at `ordinal`, or None if out of range.
    pub fn get(&self, ordinal: usize) -> Option<Entry<'_>> {
        self.table.get(ordinal).map(|slot| Entry {
            content: self.arena.content(slot),
            len: slot.len,
        })
    }

    /// Same as [`StringStore::get`].
    pub fn query_by_index(&self, ordinal: usize) -> Option<Entry<'_>> {
        self.get(ordinal)
    }

    /// Live records in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        self.table
            .iter()
            .enumerate()
            .map(move |(ordinal, slot)| (ordinal, self.arena.content(slot)))
    }

    /// Store `content` and return its ordinal.
    ///
    /// The record lands in the first gap that fits, so the returned ordinal
    /// is not necessarily `count() - 1`, and every record after it shifts
    /// up by one.
    pub fn store(&mut self, content: impl AsRef<[u8]>) -> StoreResult<usize> {
        let content = content.as_ref();
        let len = record_len(content)?;

        let placement = find_space(
            &mut self.arena,
            &mut self.table,
            len,
            self.config.compact_on_demand,
        )
        .map_err(|e| {
            debug!(requested = len, free = self.arena.free(), "store rejected: {}", e);
            e
        })?;

        Ok(self.place(placement, content))
    }

    /// First record at or after `begin` whose content equals `content`.
    pub fn query_next(&self, content: impl AsRef<[u8]>, begin: usize) -> Option<Match<'_>> {
        let content = content.as_ref();
        self.table
            .iter()
            .enumerate()
            .skip(begin)
            .find(|(_, slot)| exact_match(self.arena.content(slot), slot.len, content))
            .map(|(ordinal, slot)| Match {
                content: self.arena.content(slot),
                ordinal,
            })
    }

    /// Every record whose content equals `content`, in table order.
    ///
    /// The result borrows the store's scratch list and is replaced by the
    /// next query.
    pub fn query_all(&mut self, content: impl AsRef<[u8]>) -> QueryResult<'_> {
        let content = content.as_ref();
        self.scratch.clear();

        let mut begin = 0usize;
        loop {
            let Some(ordinal) = self.query_next(content, begin).map(|m| m.ordinal) else {
                break;
            };
            if let Some(slot) = self.table.get(ordinal).copied() {
                self.scratch.push(Hit { slot, ordinal });
            }
            begin = ordinal + 1;
        }

        QueryResult::new(&self.scratch, &self.arena)
    }

    /// Every record that contains `content` as a contiguous substring, in
    /// table order.
    ///
    /// An empty `content` matches every record. The result borrows the
    /// store's scratch list and is replaced by the next query.
    pub fn fuzzy_query_all(&mut self, content: impl AsRef<[u8]>) -> QueryResult<'_> {
        let content = content.as_ref();
        self.scratch.clear();

        for (ordinal, slot) in self.table.iter().enumerate() {
            if contains(self.arena.content(slot), content) {
                self.scratch.push(Hit { slot: *slot, ordinal });
            }
        }

        QueryResult::new(&self.scratch, &self.arena)
    }

    /// Delete the record at `ordinal`. Later ordinals shift down by one.
    pub fn delete_at(&mut self, ordinal: usize) -> StoreResult<()> {
        self.check_ordinal(ordinal)?;
        self.remove_record(ordinal);
        Ok(())
    }

    /// Delete the first record at or after `begin` equal to `content`.
    /// Returns the ordinal it held.
    pub fn delete_next(&mut self, content: impl AsRef<[u8]>, begin: usize) -> StoreResult<usize> {
        let ordinal = self
            .query_next(content, begin)
            .map(|m| m.ordinal)
            .ok_or(StoreError::NotFound)?;
        self.remove_record(ordinal);
        Ok(ordinal)
    }

    /// Delete every record equal to `content`. Returns how many were removed.
    ///
    /// Each search resumes at the ordinal just deleted: the following
    /// record has shifted down into it.
    pub fn delete_all(&mut self, content: impl AsRef<[u8]>) -> usize {
        let content = content.as_ref();
        let mut deleted = 0usize;
        let mut begin = 0usize;

        while let Ok(ordinal) = self.delete_next(content, begin) {
            deleted += 1;
            begin = ordinal;
        }
        deleted
    }

    /// Replace the content of the record at `ordinal`.
    ///
    /// Content that fits in the existing record is rewritten in place and
    /// keeps its ordinal. Longer content is placed wherever the allocator
    /// would put it once the old record is gone, so the ordinal may
    /// change. On any error the store is left untouched.
    pub fn alter_at(&mut self, ordinal: usize, content: impl AsRef<[u8]>) -> StoreResult<usize> {
        let content = content.as_ref();
        let old = self.check_ordinal(ordinal)?;
        let new_len = record_len(content)?;

        if new_len <= old.len {
            self.arena.write(old.offset, content);
            self.arena.clear(old.offset + new_len, old.len - new_len);
            self.table.set_len(ordinal, new_len);
            self.arena.release(old.len - new_len);
            return Ok(ordinal);
        }

        let free = self.arena.free();
        if new_len - old.len > free {
            debug!(requested = new_len, free, "alter rejected: not enough free space");
            return Err(StoreError::Full { requested: new_len, free });
        }

        // Decide placement before touching anything.
        if let Some(placement) = scan_gaps(&self.table, self.arena.capacity(), new_len, Some(ordinal)) {
            self.remove_record(ordinal);
            return Ok(self.place(placement, content));
        }

        if !self.config.compact_on_demand {
            debug!(requested = new_len, free, "alter rejected: fragmented and compaction disabled");
            return Err(StoreError::Full { requested: new_len, free });
        }

        // free + old.len >= new_len, so after compaction the trailing gap fits.
        self.remove_record(ordinal);
        compact(&mut self.arena, &mut self.table);
        let placement = Placement {
            offset: self.arena.used(),
            position: self.table.len(),
        };
        Ok(self.place(placement, content))
    }

    /// Alter the first record at or after `begin` equal to `source`.
    pub fn alter_next(
        &mut self,
        source: impl AsRef<[u8]>,
        begin: usize,
        content: impl AsRef<[u8]>,
    ) -> StoreResult<Altered> {
        let matched = self
            .query_next(source, begin)
            .map(|m| m.ordinal)
            .ok_or(StoreError::NotFound)?;
        let ordinal = self.alter_at(matched, content)?;
        Ok(Altered { source: matched, ordinal })
    }

    /// Alter every record equal to `source`. Returns how many were altered.
    ///
    /// Stops at the first alteration that fails. Returns 0 without
    /// scanning when `source` and `content` are equal.
    pub fn alter_all(&mut self, source: impl AsRef<[u8]>, content: impl AsRef<[u8]>) -> usize {
        let source = source.as_ref();
        let content = content.as_ref();
        if source == content {
            return 0;
        }

        let mut altered = 0usize;
        let mut begin = 0usize;
        while let Ok(outcome) = self.alter_next(source, begin, content) {
            altered += 1;
            begin = outcome.source;
        }
        altered
    }

    /// Compact the arena into one contiguous used region. Returns the free
    /// size, which is now a single gap at the end.
    pub fn defragment(&mut self) -> usize {
        compact(&mut self.arena, &mut self.table).free
    }

    /// Check that the slot table describes the arena consistently.
    pub fn verify(&self) -> StoreResult<()> {
        let total = self.table.check(self.arena.capacity())?;
        if total != self.arena.used() {
            return Err(StoreError::InvariantViolation {
                position: self.table.len(),
                reason: format!("record lengths sum to {} but used size is {}", total, self.arena.used()),
            });
        }

        let bytes = self.arena.as_bytes();
        for (position, slot) in self.table.iter().enumerate() {
            if bytes[slot.end() - 1] != TERMINATOR {
                return Err(StoreError::InvariantViolation {
                    position,
                    reason: "record is not terminated".into(),
                });
            }
            if self.arena.content(slot).contains(&TERMINATOR) {
                return Err(StoreError::InvariantViolation {
                    position,
                    reason: "record content contains the terminator".into(),
                });
            }
        }
        Ok(())
    }

    fn check_ordinal(&self, ordinal: usize) -> StoreResult<Slot> {
        self.table.get(ordinal).copied().ok_or(StoreError::OutOfRange {
            ordinal,
            count: self.table.len(),
        })
    }

    /// Write `content` at a placement already found by the allocator.
    fn place(&mut self, placement: Placement, content: &[u8]) -> usize {
        let len = content.len() + 1;
        self.arena.write(placement.offset, content);
        self.table.insert_at(placement.position, Slot { offset: placement.offset, len });
        self.arena.reserve(len);
        placement.position
    }

    fn remove_record(&mut self, ordinal: usize) -> Slot {
        let slot = self.table.remove_at(ordinal);
        self.arena.clear(slot.offset, slot.len);
        self.arena.release(slot.len);
        slot
    }
}

/// Units a record for `content` occupies, terminator included.
fn record_len(content: &[u8]) -> StoreResult<usize> {
    if content.is_empty() {
        return Err(StoreError::InvalidArgument {
            reason: "content must not be empty".into(),
        });
    }
    if content.contains(&TERMINATOR) {
        return Err(StoreError::InvalidArgument {
            reason: "content must not contain the terminator unit".into(),
        });
    }
    Ok(content.len() + 1)
}
