use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the table engine.
///
/// Cell-level coercion failures never show up here: they are skipped by the
/// operation that encountered them.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to load '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("no valid numeric values found in column '{0}'")]
    NoNumericData(String),

    #[error("invalid aggregate operation '{0}' (expected sum, mean, min or max)")]
    InvalidOperation(String),

    #[error("invalid filter condition '{0}' (expected >, <, == or contains)")]
    InvalidCondition(String),

    #[error("failed to write '{}': {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TableError>;
