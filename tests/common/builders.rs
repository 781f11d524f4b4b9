//! Test builders: ergonomic constructors for `HttpEntry`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use httpnorm_core::{HttpEntry, HttpField};

// ---------------------------------------------------------------------------
// HttpEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`HttpEntry`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = HttpEntryBuilder::new("example.com", "http://example.com/a")
///     .column(HttpField::Method, "GET")
///     .build();
/// ```
pub struct HttpEntryBuilder {
    entry: HttpEntry,
}

impl HttpEntryBuilder {
    pub fn new(host: &str, uri: &str) -> Self {
        let mut entry = HttpEntry::default();
        entry.set_column(HttpField::Timestamp, "1300475168.652003").unwrap();
        entry.set_column(HttpField::Uid, "CUM0KZ3MLUfNB0cl11").unwrap();
        entry.set_column(HttpField::Source, "141.142.220.118").unwrap();
        entry.set_column(HttpField::SourcePort, "48649").unwrap();
        entry.set_column(HttpField::Destination, "208.80.152.118").unwrap();
        entry.set_column(HttpField::DestinationPort, "80").unwrap();
        entry.set_column(HttpField::Method, "GET").unwrap();
        entry.host = host.to_string();
        entry.uri = uri.to_string();
        Self { entry }
    }

    /// Set any column through the registry, as the log readers do.
    pub fn column(mut self, field: HttpField, raw: &str) -> Self {
        self.entry.set_column(field, raw).unwrap();
        self
    }

    pub fn build(self) -> HttpEntry {
        self.entry
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build an entry with only `host` and `uri` set beyond the defaults above.
pub fn http_entry(host: &str, uri: &str) -> HttpEntry {
    HttpEntryBuilder::new(host, uri).build()
}

/// Normalize a copy of `entry` and return it.
pub fn normalized(entry: &HttpEntry) -> HttpEntry {
    let mut entry = entry.clone();
    entry.normalize();
    entry
}
