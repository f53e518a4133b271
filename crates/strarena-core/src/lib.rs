//! StrArena Core — Fixed-Capacity In-Memory String Store
//!
//! Interns short strings inside one bounded arena the store fully owns.
//! Records are addressed by a dense ordinal and searchable by exact or
//! substring match. Nothing grows after construction and no allocation is
//! made per record.
//!
//! # Architecture
//!
//! - **Arena**: fixed buffer holding every record's bytes plus a terminator
//! - **Slot table**: offset-ordered `(offset, len)` list; index == ordinal
//! - **Allocator**: first-fit gap search, one compaction retry when fragmented
//! - **Compaction**: overlap-safe relocation of all records to the arena start
//!
//! # Ordinals
//!
//! An ordinal is a position in the slot table, not a stable identifier.
//! It changes whenever an earlier record is inserted or removed.

pub mod allocator;
pub mod arena;
pub mod compaction;
pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod shared;
pub mod table;

// Re-export key types for convenience
pub use compaction::CompactionResult;
pub use config::Config;
pub use engine::{Altered, Entry, StringStore};
pub use error::{StoreError, StoreResult};
pub use query::{Match, QueryResult};
pub use shared::SharedStore;
