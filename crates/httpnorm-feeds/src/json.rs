//! Reader for the monitor's JSON-lines log format.
//!
//! Each line is one object keyed by source column name
//! (`{"ts":1300475168.652003,"uid":"C1","id.orig_h":"10.0.0.1",...}`).
//! `ts` may be a number of epoch seconds or an RFC 3339 string. Array values
//! (sets and vectors) are joined with `,` so they reach the record in the same
//! serialized form the tab-separated format carries.

use crate::error::FeedError;
use chrono::{DateTime, SubsecRound, Utc};
use httpnorm_core::types::epoch_seconds;
use httpnorm_core::{HttpEntry, HttpField};
use serde_json::{Map, Value};

const SET_SEPARATOR: &str = ",";

/// Parse one JSON log line.
pub fn parse_line(line: &str, line_no: usize) -> Result<HttpEntry, FeedError> {
    let object: Map<String, Value> =
        serde_json::from_str(line).map_err(|source| FeedError::Json { line: line_no, source })?;

    let mut entry = HttpEntry::default();
    for (key, value) in &object {
        let Some(field) = HttpField::from_column(key) else {
            continue;
        };
        if field == HttpField::Timestamp {
            entry.timestamp = parse_timestamp(value, line_no)?;
            continue;
        }
        let raw = render(value).ok_or_else(|| shape(line_no, format!("{key} holds an object")))?;
        entry
            .set_column(field, &raw)
            .map_err(|source| FeedError::Field { line: line_no, source })?;
    }
    Ok(entry)
}

fn parse_timestamp(value: &Value, line_no: usize) -> Result<DateTime<Utc>, FeedError> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .and_then(epoch_seconds::from_f64)
            .ok_or_else(|| shape(line_no, format!("ts {number} out of range"))),
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(6))
            .map_err(|_| shape(line_no, format!("ts {text:?} is not RFC 3339"))),
        Value::Null => Ok(DateTime::<Utc>::default()),
        other => Err(shape(line_no, format!("ts {other} is not a time"))),
    }
}

/// Text form of a JSON value as [`HttpEntry::set_column`] expects it.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(if *flag { "T" } else { "F" }.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::Object(_) => None,
                scalar => render(scalar),
            })
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(SET_SEPARATOR)),
        Value::Object(_) => None,
    }
}

fn shape(line: usize, reason: String) -> FeedError {
    FeedError::JsonShape { line, reason }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
