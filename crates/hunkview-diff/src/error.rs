//! Error types for the diff crate.

use std::fmt;

use crate::edit::EditKind;

/// One of the two coordinate spaces of a diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The old revision.
    A,
    /// The new revision.
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Errors that can occur while building or assembling a diff.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// The flushed cursor does not sit at the start of the next edit.
    #[error("edit script out of sync on side {side}: expected line {expected}, cursor at {actual}")]
    InvariantViolation {
        side: Side,
        expected: usize,
        actual: usize,
    },

    /// An edit reached dispatch with a kind the assembler cannot render.
    #[error("unsupported edit kind: {0:?}")]
    UnsupportedEditKind(EditKind),

    /// A line inside an edit range was not materialized by the loader.
    #[error("line {line} on side {side} is inside an edit but not loaded")]
    LineNotLoaded { side: Side, line: usize },

    /// A line was inserted past the logical end of a sparse store.
    #[error("line {line} out of range for file of {size} lines")]
    LineOutOfRange { line: usize, size: usize },

    /// An edit script failed upstream validation.
    #[error("malformed edit script at edit {index}: {reason}")]
    MalformedEditScript { index: usize, reason: String },
}

impl DiffError {
    /// Returns `true` if the error means the edit script and the file
    /// content disagree. These are never user-correctable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DiffError::InvariantViolation { .. }
                | DiffError::UnsupportedEditKind(_)
                | DiffError::LineNotLoaded { .. }
        )
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
