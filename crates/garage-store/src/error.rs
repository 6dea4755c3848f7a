//! # Store Error Types
//!
//! Error types for totals persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / bad record line / non-finite total                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path or line context                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in garage-sim) ← Exit station logs it and carries on        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use garage_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Category of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Caller passed a value the accumulator refuses.
    InvalidArgument,

    /// The in-memory record could not be encoded for saving.
    EncodingFailure,

    /// The record could not be read or written.
    IoFailure,
}

/// Totals persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Negative or non-numeric delta passed to an update.
    #[error("Invalid totals update: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The record cannot be encoded.
    ///
    /// ## When This Occurs
    /// - A total became NaN or infinite
    /// - A total became negative
    #[error("Sorry, data could not be encoded for saving: {0}")]
    Encoding(String),

    /// Reading or writing the backing file failed.
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted line does not hold a non-negative number.
    #[error("Totals record is corrupt at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the category this error belongs to.
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::InvalidArgument(_) => StoreErrorKind::InvalidArgument,
            StoreError::Encoding(_) => StoreErrorKind::EncodingFailure,
            StoreError::Io { .. } | StoreError::Corrupt { .. } => StoreErrorKind::IoFailure,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = StoreError::io("totals.txt", std::io::Error::other("disk full"));
        assert_eq!(err.kind(), StoreErrorKind::IoFailure);
        assert_eq!(err.to_string(), "I/O failure on totals.txt: disk full");

        let err = StoreError::Corrupt {
            line: 2,
            reason: "not a number".to_string(),
        };
        assert_eq!(err.kind(), StoreErrorKind::IoFailure);

        let err = StoreError::Encoding("hours is NaN".to_string());
        assert_eq!(err.kind(), StoreErrorKind::EncodingFailure);
    }
}
