//! Error types for StrArena operations
//!
//! All StrArena failures are represented by the StoreError enum. Every
//! failure is local and recoverable: an operation that returns an error
//! leaves the store exactly as it found it.

use std::fmt;
use std::error::Error;

/// StrArena error types with detailed context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Ordinal does not address a live record
    OutOfRange {
        /// The ordinal that was requested
        ordinal: usize,
        /// Number of live records at the time of the call
        count: usize,
    },

    /// No record matched the requested content
    NotFound,

    /// No free space for the requested length, even after compaction
    Full {
        /// Storage units requested, terminator included
        requested: usize,
        /// Free storage units at the time of the call
        free: usize,
    },

    /// Content cannot be stored as a record
    InvalidArgument {
        /// Why the content was rejected
        reason: String,
    },

    /// Configuration rejected by `Config::validate`
    InvalidConfig {
        /// Description of the offending parameter
        reason: String,
    },

    /// Slot table no longer describes the arena consistently
    InvariantViolation {
        /// Table position where the violation was detected
        position: usize,
        /// Description of the violation
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::OutOfRange { ordinal, count } => {
                write!(f, "Ordinal {} out of range: store holds {} records", ordinal, count)
            }

            StoreError::NotFound => write!(f, "No matching record"),

            StoreError::Full { requested, free } => {
                write!(f, "Store full: requested {} units, {} free", requested, free)
            }

            StoreError::InvalidArgument { reason } => {
                write!(f, "Invalid argument: {}", reason)
            }

            StoreError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }

            StoreError::InvariantViolation { position, reason } => {
                write!(f, "Slot table invariant violated at position {}: {}", position, reason)
            }
        }
    }
}

impl Error for StoreError {}

/// Result type alias for StrArena operations
pub type StoreResult<T> = Result<T, StoreError>;
