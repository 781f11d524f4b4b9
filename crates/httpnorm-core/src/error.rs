//! Error types for httpnorm-core.

use crate::schema::{FieldKind, HttpField};
use thiserror::Error;

/// A raw column value could not be stored into a record field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("{field}: invalid {kind} value {value:?}")]
    InvalidValue {
        field: HttpField,
        kind: FieldKind,
        value: String,
    },
    #[error("{0} is assigned by the store and has no source column")]
    NotAColumn(HttpField),
}

/// Configuration could not be assembled from its layers.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0} does not exist")]
    Missing(std::path::PathBuf),
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}
