//! Pipeline: normalizes entries coming off the feeds and hands them to the writer.
//!
//! For every entry: rewrite the URI, check the host against the allow-list,
//! then either write the document or drop it. Per-line feed errors are logged
//! and counted; they never stop the pipeline.

use crate::writer::{DocumentWriter, WriteError};
use httpnorm_core::config::FilterConfig;
use httpnorm_core::{AllowList, HttpEntry};
use httpnorm_feeds::FeedItem;
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// What happens to an entry after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Write,
    /// Host is allow-listed and allow-listed entries are dropped.
    Drop,
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Entries received from the feeds.
    pub read: usize,
    pub written: usize,
    /// Entries dropped because their host is allow-listed.
    pub dropped: usize,
    /// Lines the feeds could not turn into entries.
    pub malformed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    allow_list: AllowList,
    drop_allowed: bool,
}

impl Pipeline {
    pub fn new(allow_list: AllowList, drop_allowed: bool) -> Self {
        Self {
            allow_list,
            drop_allowed,
        }
    }

    pub fn from_config(filter: &FilterConfig) -> Self {
        Self::new(filter.allow_list.clone(), filter.drop_allowed)
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Normalize `entry` in place and decide whether it is written.
    pub fn process(&self, entry: &mut HttpEntry) -> Disposition {
        entry.normalize();
        if self.drop_allowed && self.allow_list.matches(entry) {
            trace!(uid = %entry.uid, host = %entry.host, "dropping allow-listed entry");
            Disposition::Drop
        } else {
            Disposition::Write
        }
    }

    /// Drain `rx` until every sender is gone.
    pub async fn run<W: Write>(
        &self,
        mut rx: mpsc::Receiver<FeedItem>,
        writer: &mut DocumentWriter<W>,
    ) -> Result<PipelineStats, WriteError> {
        let mut stats = PipelineStats::default();

        while let Some(item) = rx.recv().await {
            let mut entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping malformed log line");
                    stats.malformed += 1;
                    continue;
                }
            };
            stats.read += 1;
            match self.process(&mut entry) {
                Disposition::Write => {
                    writer.write(&entry)?;
                    stats.written += 1;
                }
                Disposition::Drop => stats.dropped += 1,
            }
        }

        writer.flush()?;
        Ok(stats)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
