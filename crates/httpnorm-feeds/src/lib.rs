//! httpnorm-feeds: monitor HTTP log readers for httpnorm.
//!
//! Each feed reads a log source line by line, materializes [`HttpEntry`]
//! records through the field registry in `httpnorm-core`, and pushes them
//! onto a bounded channel for the pipeline. Per-line problems travel down
//! the same channel as `Err` items; a broken header or an I/O failure ends
//! the feed and is returned from its task.

pub mod error;
pub mod json;
pub mod reader;
pub mod tsv;

use httpnorm_core::HttpEntry;
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

pub use error::FeedError;
pub use reader::{pump, FeedSummary, LogFormat, LogReader};

/// One item sent from a feed to the pipeline.
pub type FeedItem = Result<HttpEntry, FeedError>;

/// A log source that can be drained onto a channel.
pub trait FeedHandle: Send + Sync {
    /// Name used in log messages (a path, or `-` for stdin).
    fn name(&self) -> &str;

    /// Start reading on a background task. The task resolves once the source
    /// is exhausted, the receiver is dropped, or a fatal error occurs.
    fn spawn(
        self: Box<Self>,
        tx: mpsc::Sender<FeedItem>,
    ) -> JoinHandle<Result<FeedSummary, FeedError>>;
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// Reads a log file from start to end.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
    name: String,
    format: Option<LogFormat>,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            format: None,
        }
    }

    /// Skip format detection.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl FeedHandle for FileFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(
        self: Box<Self>,
        tx: mpsc::Sender<FeedItem>,
    ) -> JoinHandle<Result<FeedSummary, FeedError>> {
        tokio::spawn(async move {
            let file = tokio::fs::File::open(&self.path).await?;
            let reader = self.format.map_or_else(LogReader::new, LogReader::with_format);
            let summary = pump(BufReader::new(file), reader, &tx).await?;
            info!(feed = %self.name, lines = summary.lines, entries = summary.entries, "file drained");
            Ok::<_, FeedError>(summary)
        })
    }
}

// ---------------------------------------------------------------------------
// Stdin
// ---------------------------------------------------------------------------

/// Reads a log piped on standard input.
#[derive(Debug, Clone, Default)]
pub struct StdinFeed {
    format: Option<LogFormat>,
}

impl StdinFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl FeedHandle for StdinFeed {
    fn name(&self) -> &str {
        "-"
    }

    fn spawn(
        self: Box<Self>,
        tx: mpsc::Sender<FeedItem>,
    ) -> JoinHandle<Result<FeedSummary, FeedError>> {
        tokio::spawn(async move {
            let reader = self.format.map_or_else(LogReader::new, LogReader::with_format);
            let summary = pump(BufReader::new(tokio::io::stdin()), reader, &tx).await?;
            info!(feed = "-", lines = summary.lines, entries = summary.entries, "stdin drained");
            Ok::<_, FeedError>(summary)
        })
    }
}
