//! Writer: serializes entries as store documents, one JSON object per line.
//!
//! Documents use the store field names (`id_origin_h`, `request_body_len`,
//! ...). `_id` is left out while unset so the store assigns one on insert.

use httpnorm_core::HttpEntry;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Newline-delimited JSON document sink.
pub struct DocumentWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn write(&mut self, entry: &HttpEntry) -> Result<(), WriteError> {
        serde_json::to_writer(&mut self.out, entry)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), WriteError> {
        self.out.flush()?;
        Ok(())
    }

    /// Documents written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Read back a document produced by [`DocumentWriter`].
pub fn read_document(line: &str) -> Result<HttpEntry, serde_json::Error> {
    serde_json::from_str(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
