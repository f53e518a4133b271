//! Configuration management for StrArena
//!
//! Provides capacity presets for common deployment sizes
//! and validation for custom configurations.

use crate::error::{StoreError, StoreResult};

/// Smallest record: one content unit plus the terminator.
pub const MIN_RECORD_LEN: usize = 2;

/// Upper bound on arena capacity (64 MiB of storage units)
pub const MAX_CAPACITY: usize = 64 * 1024 * 1024;

/// StrArena configuration with capacity presets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Arena capacity in storage units, fixed for the lifetime of the store
    pub capacity: usize,
    /// Allow store/alter to compact the arena when no single gap fits
    pub compact_on_demand: bool,
}

impl Config {
    /// Debug-class: 30 units, small enough to exercise fragmentation by hand
    pub fn debug() -> Self {
        Self {
            capacity: 30,
            compact_on_demand: true,
        }
    }

    /// Standard-class: 1000 units
    pub fn standard() -> Self {
        Self {
            capacity: 1000,
            compact_on_demand: true,
        }
    }

    /// Large-class: 64 KiB of units
    pub fn large() -> Self {
        Self {
            capacity: 64 * 1024,
            compact_on_demand: true,
        }
    }

    /// Custom capacity with default policy
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, ..Self::standard() }
    }

    /// Maximum number of records this capacity can hold.
    pub fn max_records(&self) -> usize {
        self.capacity / MIN_RECORD_LEN
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> StoreResult<()> {
        if self.capacity < MIN_RECORD_LEN {
            return Err(StoreError::InvalidConfig {
                reason: format!("capacity must be >= {}", MIN_RECORD_LEN),
            });
        }
        if self.capacity > MAX_CAPACITY {
            return Err(StoreError::InvalidConfig {
                reason: format!("capacity must be <= {}", MAX_CAPACITY),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self { Self::standard() }
}
