//! Format detection and the async read loop shared by every feed.

use crate::error::FeedError;
use crate::tsv::TsvParser;
use crate::{json, FeedItem};
use httpnorm_core::HttpEntry;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// On-disk layout of a monitor log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Tab-separated with `#`-directive headers.
    Tsv,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Guess the format from the first non-blank line.
    pub fn detect(line: &str) -> Self {
        if line.trim_start().starts_with('{') {
            LogFormat::Json
        } else {
            LogFormat::Tsv
        }
    }
}

/// Line-at-a-time parser for one log stream.
#[derive(Debug, Clone, Default)]
pub struct LogReader {
    format: Option<LogFormat>,
    tsv: TsvParser,
    line_no: usize,
}

impl LogReader {
    /// A reader that detects the format from the first non-blank line.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: LogFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }

    pub fn format(&self) -> Option<LogFormat> {
        self.format
    }

    /// Lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Parse the next raw line. Invalid UTF-8 loses only this line.
    pub fn read_bytes(&mut self, line: &[u8]) -> Result<Option<HttpEntry>, FeedError> {
        match std::str::from_utf8(line) {
            Ok(text) => self.read_line(text),
            Err(_) => {
                self.line_no += 1;
                Err(FeedError::Encoding { line: self.line_no })
            }
        }
    }

    /// Parse the next line. Blank lines and headers yield `Ok(None)`.
    pub fn read_line(&mut self, line: &str) -> Result<Option<HttpEntry>, FeedError> {
        self.line_no += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            return Ok(None);
        }
        let format = *self.format.get_or_insert_with(|| {
            let format = LogFormat::detect(line);
            debug!(?format, "detected log format");
            format
        });
        match format {
            LogFormat::Tsv => self.tsv.parse_line(line, self.line_no),
            LogFormat::Json => json::parse_line(line, self.line_no).map(Some),
        }
    }
}

/// Counters for one drained source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub lines: usize,
    pub entries: usize,
    pub errors: usize,
}

/// Read `input` to the end, sending every entry and every per-line error to `tx`.
///
/// Stops early, without error, when the receiver is gone. A fatal error
/// (I/O, broken header) ends the read and is returned instead of sent.
pub async fn pump<R>(
    input: R,
    mut reader: LogReader,
    tx: &mpsc::Sender<FeedItem>,
) -> Result<FeedSummary, FeedError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.split(b'\n');
    let mut summary = FeedSummary::default();

    while let Some(line) = lines.next_segment().await? {
        summary.lines += 1;
        let item = match reader.read_bytes(&line) {
            Ok(None) => continue,
            Ok(Some(entry)) => {
                summary.entries += 1;
                Ok(entry)
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                summary.errors += 1;
                Err(err)
            }
        };
        if tx.send(item).await.is_err() {
            trace!("receiver dropped, stopping read");
            break;
        }
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
