//! httpnorm-core: HTTP connection records between the log reader and the store.
//!
//! This crate owns the record and the per-record rules applied to it:
//!
//! - [`schema`]: the field registry mapping each field to its source-log
//!   column, its store field name and its type tag.
//! - [`types`]: the [`HttpEntry`] record itself.
//! - [`normalizer`]: the URI rewrite applied once to every parsed entry.
//! - [`allow_list`]: the host allow-list predicate.
//!
//! # Architecture
//!
//! ```text
//! Feed (log reader) ──► normalize ──► allow-list ──► Writer (store documents)
//! ```
//!
//! [`config`] reads the configuration file; nothing else here performs I/O.

pub mod allow_list;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod schema;
pub mod types;

pub use allow_list::AllowList;
pub use error::{ConfigError, FieldError};
pub use normalizer::process_record;
pub use schema::{FieldKind, HttpField};
pub use types::{DocumentId, HttpEntry};
