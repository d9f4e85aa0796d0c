//! Error types for scoring input coercion and the record store.
//!
//! Two layers, following how failures are handled:
//!
//! - [`ParseError`]: a single field of a single row failed type coercion.
//!   Never fatal; the row is dropped and reported as a [`RowIssue`].
//! - [`StoreError`]: a whole operation failed (schema mismatch on import,
//!   unreadable or unwritable backing file). Surfaced to the caller and the
//!   operation aborts before the on-disk state is touched.
//!
//! # Example
//!
//! ```rust
//! use worksafe::errors::{ParseError, StoreError};
//!
//! let err = StoreError::schema(vec!["posture".to_string()]);
//! assert!(err.is_schema());
//! assert_eq!(err.to_string(), "missing required columns: posture");
//!
//! let parse = ParseError::InvalidDate("2025-13-40".into());
//! assert_eq!(parse.to_string(), "invalid date '2025-13-40' (expected YYYY-MM-DD)");
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field-level coercion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ParseError {
    #[error("missing value")]
    Missing,

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("negative value '{0}'")]
    Negative(String),

    #[error("expected a whole number, got '{0}'")]
    NotInteger(String),

    #[error("task name is empty")]
    EmptyTask,

    #[error("cell is not valid UTF-8 text")]
    InvalidText,
}

/// A row that was dropped during load or import, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,
    pub column: &'static str,
    pub error: ParseError,
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.column, self.error)
    }
}

/// Whole-operation failure of the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Import data lacks required columns. Checked before any row is read.
    #[error("missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Backing file could not be read or written
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV structure (unbalanced quotes, ragged rows)
    #[error("malformed table data: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub fn schema(missing: Vec<String>) -> Self {
        Self::Schema { missing }
    }

    pub fn io(action: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
