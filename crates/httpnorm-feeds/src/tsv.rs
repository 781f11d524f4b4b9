//! Reader for the monitor's tab-separated log format.
//!
//! A log starts with `#`-directives describing the layout:
//!
//! ```text
//! #separator \x09
//! #set_separator	,
//! #empty_field	(empty)
//! #unset_field	-
//! #path	http
//! #fields	ts	uid	id.orig_h	...
//! #types	time	string	addr	...
//! ```
//!
//! Data lines follow, one record per line. Columns are resolved to record
//! fields once, when `#fields` is read; columns the registry does not know are
//! skipped. Unset and empty markers become the field's zero value. Values are
//! otherwise passed through unchanged.

use crate::error::FeedError;
use httpnorm_core::{FieldKind, HttpEntry, HttpField};

const DEFAULT_SEPARATOR: &str = "\t";
const DEFAULT_SET_SEPARATOR: &str = ",";
const DEFAULT_EMPTY_FIELD: &str = "(empty)";
const DEFAULT_UNSET_FIELD: &str = "-";
const HTTP_PATH: &str = "http";

/// Incremental parser for one tab-separated log stream.
#[derive(Debug, Clone)]
pub struct TsvParser {
    separator: String,
    set_separator: String,
    empty_field: String,
    unset_field: String,
    /// Column names in header order, as read from `#fields`.
    column_names: Vec<String>,
    /// Record field per column; `None` for columns the registry does not know.
    columns: Option<Vec<Option<HttpField>>>,
}

impl Default for TsvParser {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            set_separator: DEFAULT_SET_SEPARATOR.to_string(),
            empty_field: DEFAULT_EMPTY_FIELD.to_string(),
            unset_field: DEFAULT_UNSET_FIELD.to_string(),
            column_names: Vec::new(),
            columns: None,
        }
    }
}

impl TsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Separator used inside set and vector values.
    pub fn set_separator(&self) -> &str {
        &self.set_separator
    }

    /// Parse one line. Directives and blank lines yield `Ok(None)`.
    pub fn parse_line(&mut self, line: &str, line_no: usize) -> Result<Option<HttpEntry>, FeedError> {
        if line.is_empty() {
            return Ok(None);
        }
        if let Some(directive) = line.strip_prefix('#') {
            self.apply_directive(directive, line_no)?;
            return Ok(None);
        }
        self.parse_record(line, line_no).map(Some)
    }

    fn apply_directive(&mut self, directive: &str, line_no: usize) -> Result<(), FeedError> {
        // `#separator` is the only directive split on a space: its value
        // defines how every later directive is split.
        if let Some(value) = directive.strip_prefix("separator ") {
            self.separator = unescape(value.trim());
            if self.separator.is_empty() {
                return Err(malformed(line_no, "separator"));
            }
            return Ok(());
        }

        let (name, rest) = directive
            .split_once(self.separator.as_str())
            .unwrap_or((directive, ""));
        match name {
            "set_separator" => self.set_separator = unescape(rest),
            "empty_field" => self.empty_field = rest.to_string(),
            "unset_field" => self.unset_field = rest.to_string(),
            "path" if rest != HTTP_PATH => {
                return Err(FeedError::UnsupportedPath {
                    line: line_no,
                    path: rest.to_string(),
                })
            }
            "fields" => {
                if rest.is_empty() {
                    return Err(malformed(line_no, name));
                }
                self.column_names = rest.split(self.separator.as_str()).map(str::to_string).collect();
                self.columns = Some(
                    self.column_names
                        .iter()
                        .map(|name| HttpField::from_column(name))
                        .collect(),
                );
            }
            "types" => self.check_types(rest, line_no)?,
            // `#open`, `#close`, `#path http` and anything newer carry nothing we need.
            _ => {}
        }
        Ok(())
    }

    fn check_types(&self, rest: &str, line_no: usize) -> Result<(), FeedError> {
        let Some(columns) = &self.columns else {
            return Err(malformed(line_no, "types"));
        };
        let tags: Vec<&str> = rest.split(self.separator.as_str()).collect();
        if tags.len() != columns.len() {
            return Err(malformed(line_no, "types"));
        }
        for ((field, tag), name) in columns.iter().zip(&tags).zip(&self.column_names) {
            let Some(field) = field else { continue };
            if FieldKind::from_type_tag(tag) != Some(field.kind()) {
                return Err(FeedError::SchemaMismatch {
                    column: name.clone(),
                    expected: field.kind(),
                    found: tag.to_string(),
                });
            }
        }
        Ok(())
    }

    fn parse_record(&self, line: &str, line_no: usize) -> Result<HttpEntry, FeedError> {
        let Some(columns) = &self.columns else {
            return Err(FeedError::MissingFields { line: line_no });
        };
        let values: Vec<&str> = line.split(self.separator.as_str()).collect();
        if values.len() != columns.len() {
            return Err(FeedError::ColumnCount {
                line: line_no,
                expected: columns.len(),
                found: values.len(),
            });
        }

        let mut entry = HttpEntry::default();
        for (field, value) in columns.iter().zip(values) {
            let Some(field) = field else { continue };
            let value = if value == self.unset_field || value == self.empty_field {
                ""
            } else {
                value
            };
            entry
                .set_column(*field, value)
                .map_err(|source| FeedError::Field { line: line_no, source })?;
        }
        Ok(entry)
    }
}

fn malformed(line: usize, directive: &str) -> FeedError {
    FeedError::MalformedHeader {
        line,
        directive: directive.to_string(),
    }
}

/// Decode `\xHH` escapes as written in `#separator` and `#set_separator`.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find("\\x") {
        out.push_str(&rest[..pos]);
        let hex = rest.get(pos + 2..pos + 4);
        match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
            Some(byte) => {
                out.push(char::from(byte));
                rest = &rest[pos + 4..];
            }
            None => {
                out.push_str("\\x");
                rest = &rest[pos + 2..];
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
