//! Error types for the log readers.

use httpnorm_core::{FieldError, FieldKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read log: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: not valid UTF-8")]
    Encoding { line: usize },

    #[error("line {line}: data before #fields header")]
    MissingFields { line: usize },

    #[error("line {line}: log path {path:?} is not an http log")]
    UnsupportedPath { line: usize, path: String },

    #[error("line {line}: #{directive} header is malformed")]
    MalformedHeader { line: usize, directive: String },

    #[error("column {column}: header declares type {found:?}, expected {expected}")]
    SchemaMismatch {
        column: String,
        expected: FieldKind,
        found: String,
    },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {source}")]
    Field {
        line: usize,
        #[source]
        source: FieldError,
    },

    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {reason}")]
    JsonShape { line: usize, reason: String },
}

impl FeedError {
    /// Whether the reader must stop. Header and I/O problems invalidate every
    /// following line; a bad data line only loses itself.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FeedError::Io(_)
                | FeedError::MissingFields { .. }
                | FeedError::UnsupportedPath { .. }
                | FeedError::MalformedHeader { .. }
                | FeedError::SchemaMismatch { .. }
        )
    }
}
