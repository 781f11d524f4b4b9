//! httpnorm: normalize a network monitor's HTTP log into store documents.
//!
//! Re-exports the record types from `httpnorm-core` and the readers from
//! `httpnorm-feeds`, and adds the two pieces the binary wires together.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► Pipeline (normalize, allow-list) ──► DocumentWriter
//! ```
//!
//! Feeds run on background tasks and send entries over a bounded `tokio`
//! channel; the pipeline drains it on the caller's task.

pub mod pipeline;
pub mod writer;

pub use httpnorm_core::{
    config, process_record, AllowList, DocumentId, FieldKind, HttpEntry, HttpField,
};
pub use httpnorm_feeds::{
    FeedError, FeedHandle, FeedItem, FeedSummary, FileFeed, LogFormat, LogReader, StdinFeed,
};
pub use pipeline::{Disposition, Pipeline, PipelineStats};
pub use writer::{read_document, DocumentWriter, WriteError};
