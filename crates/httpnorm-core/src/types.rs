//! The HTTP connection record.
//!
//! [`HttpEntry`] is one line of the monitor's HTTP log. The log readers build
//! it column by column through [`HttpEntry::set_column`], the normalizer
//! rewrites its URI once, and the document writer serializes it under the
//! store field names declared by the serde renames below (see
//! [`HttpField::store_name`]).

use crate::error::FieldError;
use crate::schema::HttpField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Identifier assigned by the document store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One parsed line of the HTTP connection log.
///
/// Multi-valued columns (`tags`, `proxied`, the file id/name/MIME vectors)
/// keep the delimiter-separated form the monitor wrote; nothing here splits
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpEntry {
    /// Unset until the store assigns one; omitted from documents while unset.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// Connection start.
    #[serde(rename = "ts", with = "epoch_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Monitor-generated connection id.
    pub uid: String,
    #[serde(rename = "id_origin_h")]
    pub source: IpAddr,
    #[serde(rename = "id_origin_p")]
    pub source_port: u16,
    #[serde(rename = "id_resp_h")]
    pub destination: IpAddr,
    #[serde(rename = "id_resp_p")]
    pub destination_port: u16,
    /// Ordinal of this request within a pipelined transaction.
    pub trans_depth: u64,
    pub version: String,
    pub method: String,
    /// Value of the `Host` request header.
    pub host: String,
    pub uri: String,
    pub referrer: String,
    pub user_agent: String,
    /// Uncompressed request body length in bytes.
    #[serde(rename = "request_body_len")]
    pub req_len: u64,
    /// Uncompressed response body length in bytes.
    #[serde(rename = "response_body_len")]
    pub resp_len: u64,
    pub status_code: u16,
    pub status_msg: String,
    /// Last seen 1xx informational reply code.
    pub info_code: u16,
    pub info_msg: String,
    #[serde(rename = "filename")]
    pub file_name: String,
    pub tags: String,
    #[serde(rename = "username")]
    pub user_name: String,
    pub password: String,
    /// Request headers indicating the request was proxied.
    pub proxied: String,
    pub orig_fuids: String,
    pub orig_filenames: String,
    pub orig_mime_types: String,
    pub resp_fuids: String,
    pub resp_filenames: String,
    pub resp_mime_types: String,
}

impl Default for HttpEntry {
    fn default() -> Self {
        Self {
            id: None,
            timestamp: DateTime::<Utc>::default(),
            uid: String::new(),
            source: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            source_port: 0,
            destination: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            destination_port: 0,
            trans_depth: 0,
            version: String::new(),
            method: String::new(),
            host: String::new(),
            uri: String::new(),
            referrer: String::new(),
            user_agent: String::new(),
            req_len: 0,
            resp_len: 0,
            status_code: 0,
            status_msg: String::new(),
            info_code: 0,
            info_msg: String::new(),
            file_name: String::new(),
            tags: String::new(),
            user_name: String::new(),
            password: String::new(),
            proxied: String::new(),
            orig_fuids: String::new(),
            orig_filenames: String::new(),
            orig_mime_types: String::new(),
            resp_fuids: String::new(),
            resp_filenames: String::new(),
            resp_mime_types: String::new(),
        }
    }
}

impl HttpEntry {
    /// Store one raw column value into `field`.
    ///
    /// An empty `raw` resets the field to its zero value; the log readers map
    /// the monitor's unset and empty markers to `""` before calling this.
    pub fn set_column(&mut self, field: HttpField, raw: &str) -> Result<(), FieldError> {
        let invalid = || FieldError::InvalidValue {
            field,
            kind: field.kind(),
            value: raw.to_string(),
        };

        match field {
            HttpField::Id => return Err(FieldError::NotAColumn(field)),
            HttpField::Timestamp => {
                self.timestamp = if raw.is_empty() {
                    DateTime::<Utc>::default()
                } else {
                    epoch_seconds::parse(raw).ok_or_else(invalid)?
                };
            }
            HttpField::Source => self.source = parse_addr(raw).ok_or_else(invalid)?,
            HttpField::Destination => self.destination = parse_addr(raw).ok_or_else(invalid)?,
            HttpField::SourcePort => self.source_port = parse_count(raw).ok_or_else(invalid)?,
            HttpField::DestinationPort => {
                self.destination_port = parse_count(raw).ok_or_else(invalid)?
            }
            HttpField::TransDepth => self.trans_depth = parse_count(raw).ok_or_else(invalid)?,
            HttpField::ReqLen => self.req_len = parse_count(raw).ok_or_else(invalid)?,
            HttpField::RespLen => self.resp_len = parse_count(raw).ok_or_else(invalid)?,
            HttpField::StatusCode => self.status_code = parse_count(raw).ok_or_else(invalid)?,
            HttpField::InfoCode => self.info_code = parse_count(raw).ok_or_else(invalid)?,
            text => {
                if let Some(slot) = self.text_mut(text) {
                    slot.clear();
                    slot.push_str(raw);
                }
            }
        }
        Ok(())
    }

    /// Mutable access to a field carried as text: strings, sets and vectors.
    fn text_mut(&mut self, field: HttpField) -> Option<&mut String> {
        let slot = match field {
            HttpField::Uid => &mut self.uid,
            HttpField::Version => &mut self.version,
            HttpField::Method => &mut self.method,
            HttpField::Host => &mut self.host,
            HttpField::Uri => &mut self.uri,
            HttpField::Referrer => &mut self.referrer,
            HttpField::UserAgent => &mut self.user_agent,
            HttpField::StatusMsg => &mut self.status_msg,
            HttpField::InfoMsg => &mut self.info_msg,
            HttpField::FileName => &mut self.file_name,
            HttpField::Tags => &mut self.tags,
            HttpField::UserName => &mut self.user_name,
            HttpField::Password => &mut self.password,
            HttpField::Proxied => &mut self.proxied,
            HttpField::OrigFuids => &mut self.orig_fuids,
            HttpField::OrigFilenames => &mut self.orig_filenames,
            HttpField::OrigMimeTypes => &mut self.orig_mime_types,
            HttpField::RespFuids => &mut self.resp_fuids,
            HttpField::RespFilenames => &mut self.resp_filenames,
            HttpField::RespMimeTypes => &mut self.resp_mime_types,
            _ => return None,
        };
        Some(slot)
    }
}

fn parse_addr(raw: &str) -> Option<IpAddr> {
    if raw.is_empty() {
        return Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
    raw.parse().ok()
}

fn parse_count<T: std::str::FromStr + Default>(raw: &str) -> Option<T> {
    if raw.is_empty() {
        return Some(T::default());
    }
    raw.parse().ok()
}

// ---------------------------------------------------------------------------
// Timestamp encoding
// ---------------------------------------------------------------------------

/// Fractional epoch seconds with microsecond resolution, the monitor's `time`
/// encoding. Used both for column parsing and for the `ts` document field.
pub mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse `"1300475167.096535"`. Digits past the sixth fractional place
    /// are truncated. A leading `-` negates the whole value, fraction included.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || frac.len() > 9
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let secs: i64 = whole.parse().ok()?;
        let mut micros = 0i64;
        for (i, digit) in frac.bytes().take(6).enumerate() {
            micros += i64::from(digit - b'0') * 10i64.pow(5 - i as u32);
        }
        let total = secs.checked_mul(1_000_000)?.checked_add(micros)?;
        DateTime::from_timestamp_micros(if negative { -total } else { total })
    }

    /// Convert a float of epoch seconds, rounding to the nearest microsecond.
    pub fn from_f64(value: f64) -> Option<DateTime<Utc>> {
        if !value.is_finite() {
            return None;
        }
        let micros = (value * 1e6).round();
        if micros.abs() > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp_micros(micros as i64)
    }

    pub fn to_f64(ts: &DateTime<Utc>) -> f64 {
        ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_micros()) / 1e6
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_f64(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = f64::deserialize(deserializer)?;
        from_f64(value).ok_or_else(|| serde::de::Error::custom(format!("timestamp {value} out of range")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
