//! Query results and content matching
//!
//! Multi-match queries write their hits into a scratch list owned by the
//! store. A `QueryResult` borrows that list, so it cannot outlive the next
//! call that mutates the store or reruns a query.

use crate::arena::Arena;
use crate::table::Slot;

/// A record that matched a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Stored content, terminator excluded
    pub content: &'a [u8],
    /// Ordinal of the record at the time of the query
    pub ordinal: usize,
}

/// One scratch-list entry: where a matched record lived at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    pub slot: Slot,
    pub ordinal: usize,
}

/// Borrowed view over the hits of the most recent multi-match query.
#[derive(Debug, Clone, Copy)]
pub struct QueryResult<'a> {
    hits: &'a [Hit],
    arena: &'a Arena,
}

impl<'a> QueryResult<'a> {
    pub(crate) fn new(hits: &'a [Hit], arena: &'a Arena) -> Self {
        Self { hits, arena }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Match<'a>> {
        self.hits.get(index).map(|hit| self.resolve(hit))
    }

    /// Matches in table order.
    pub fn iter(&self) -> impl Iterator<Item = Match<'a>> + 'a {
        let arena = self.arena;
        let hits = self.hits;
        hits.iter().map(move |hit| Match {
            content: arena.content(&hit.slot),
            ordinal: hit.ordinal,
        })
    }

    pub fn ordinals(&self) -> Vec<usize> {
        self.hits.iter().map(|hit| hit.ordinal).collect()
    }

    /// Copy the matches out so they survive further store calls.
    pub fn to_owned_matches(&self) -> Vec<(Vec<u8>, usize)> {
        self.iter().map(|m| (m.content.to_vec(), m.ordinal)).collect()
    }

    fn resolve(&self, hit: &Hit) -> Match<'a> {
        Match {
            content: self.arena.content(&hit.slot),
            ordinal: hit.ordinal,
        }
    }
}

/// Exact equality on stored units.
///
/// `stored_len` includes the terminator, so a length mismatch rejects
/// without comparing content.
pub fn exact_match(stored: &[u8], stored_len: usize, query: &[u8]) -> bool {
    stored_len == query.len() + 1 && stored == query
}

/// Substring containment, case-sensitive. An empty needle matches everything.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
