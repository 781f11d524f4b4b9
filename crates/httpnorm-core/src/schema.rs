//! Field registry for the HTTP connection record.
//!
//! Every field of [`HttpEntry`](crate::HttpEntry) is listed once in
//! [`HttpField`], together with the three names it is known by and the
//! monitor's type tag:
//!
//! | Accessor                   | Example (`Source`) |
//! |----------------------------|--------------------|
//! | [`HttpField::name`]        | `Source`           |
//! | [`HttpField::column`]      | `id.orig_h`        |
//! | [`HttpField::store_name`]  | `id_origin_h`      |
//! | [`HttpField::kind`]        | `addr`             |
//!
//! The log readers resolve header columns through [`HttpField::from_column`];
//! the document writer relies on the serde renames on `HttpEntry`, which the
//! tests keep in lock-step with [`HttpField::store_name`].

use phf::phf_map;
use std::fmt;

// ---------------------------------------------------------------------------
// Field kinds
// ---------------------------------------------------------------------------

/// Semantic type of a record field, as tagged in the monitor's `#types` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Store-assigned document identifier. Has no source column.
    DocumentId,
    /// Instant, fractional seconds since the Unix epoch.
    Time,
    /// IPv4 or IPv6 address.
    Addr,
    /// 16-bit transport port.
    Port,
    /// Non-negative integer.
    Count,
    String,
    /// `set[enum]`, kept in its serialized form.
    SetEnum,
    /// `set[string]`, kept in its serialized form.
    SetString,
    /// `vector[string]`, kept in its serialized form.
    VectorString,
}

impl FieldKind {
    /// The monitor's type tag for this kind, or `None` for [`FieldKind::DocumentId`].
    pub const fn type_tag(self) -> Option<&'static str> {
        match self {
            FieldKind::DocumentId => None,
            FieldKind::Time => Some("time"),
            FieldKind::Addr => Some("addr"),
            FieldKind::Port => Some("port"),
            FieldKind::Count => Some("count"),
            FieldKind::String => Some("string"),
            FieldKind::SetEnum => Some("set[enum]"),
            FieldKind::SetString => Some("set[string]"),
            FieldKind::VectorString => Some("vector[string]"),
        }
    }

    /// Parse a `#types` header tag.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            "time" => Some(FieldKind::Time),
            "addr" => Some(FieldKind::Addr),
            "port" => Some(FieldKind::Port),
            "count" => Some(FieldKind::Count),
            "string" => Some(FieldKind::String),
            "set[enum]" => Some(FieldKind::SetEnum),
            "set[string]" => Some(FieldKind::SetString),
            "vector[string]" => Some(FieldKind::VectorString),
            _ => None,
        }
    }

    /// Whether values of this kind are carried as a delimiter-separated string.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            FieldKind::SetEnum | FieldKind::SetString | FieldKind::VectorString
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag().unwrap_or("document_id"))
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// One field of the HTTP connection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpField {
    Id,
    Timestamp,
    Uid,
    Source,
    SourcePort,
    Destination,
    DestinationPort,
    TransDepth,
    Version,
    Method,
    Host,
    Uri,
    Referrer,
    UserAgent,
    ReqLen,
    RespLen,
    StatusCode,
    StatusMsg,
    InfoCode,
    InfoMsg,
    FileName,
    Tags,
    UserName,
    Password,
    Proxied,
    OrigFuids,
    OrigFilenames,
    OrigMimeTypes,
    RespFuids,
    RespFilenames,
    RespMimeTypes,
}

static COLUMNS: phf::Map<&'static str, HttpField> = phf_map! {
    "ts" => HttpField::Timestamp,
    "uid" => HttpField::Uid,
    "id.orig_h" => HttpField::Source,
    "id.orig_p" => HttpField::SourcePort,
    "id.resp_h" => HttpField::Destination,
    "id.resp_p" => HttpField::DestinationPort,
    "trans_depth" => HttpField::TransDepth,
    "version" => HttpField::Version,
    "method" => HttpField::Method,
    "host" => HttpField::Host,
    "uri" => HttpField::Uri,
    "referrer" => HttpField::Referrer,
    "user_agent" => HttpField::UserAgent,
    "request_body_len" => HttpField::ReqLen,
    "response_body_len" => HttpField::RespLen,
    "status_code" => HttpField::StatusCode,
    "status_msg" => HttpField::StatusMsg,
    "info_code" => HttpField::InfoCode,
    "info_msg" => HttpField::InfoMsg,
    "filename" => HttpField::FileName,
    "tags" => HttpField::Tags,
    "username" => HttpField::UserName,
    "password" => HttpField::Password,
    "proxied" => HttpField::Proxied,
    "orig_fuids" => HttpField::OrigFuids,
    "orig_filenames" => HttpField::OrigFilenames,
    "orig_mime_types" => HttpField::OrigMimeTypes,
    "resp_fuids" => HttpField::RespFuids,
    "resp_filenames" => HttpField::RespFilenames,
    "resp_mime_types" => HttpField::RespMimeTypes,
};

impl HttpField {
    /// Every field, in declaration order.
    pub const ALL: [HttpField; 31] = [
        HttpField::Id,
        HttpField::Timestamp,
        HttpField::Uid,
        HttpField::Source,
        HttpField::SourcePort,
        HttpField::Destination,
        HttpField::DestinationPort,
        HttpField::TransDepth,
        HttpField::Version,
        HttpField::Method,
        HttpField::Host,
        HttpField::Uri,
        HttpField::Referrer,
        HttpField::UserAgent,
        HttpField::ReqLen,
        HttpField::RespLen,
        HttpField::StatusCode,
        HttpField::StatusMsg,
        HttpField::InfoCode,
        HttpField::InfoMsg,
        HttpField::FileName,
        HttpField::Tags,
        HttpField::UserName,
        HttpField::Password,
        HttpField::Proxied,
        HttpField::OrigFuids,
        HttpField::OrigFilenames,
        HttpField::OrigMimeTypes,
        HttpField::RespFuids,
        HttpField::RespFilenames,
        HttpField::RespMimeTypes,
    ];

    /// Internal field name.
    pub const fn name(self) -> &'static str {
        match self {
            HttpField::Id => "Id",
            HttpField::Timestamp => "Timestamp",
            HttpField::Uid => "Uid",
            HttpField::Source => "Source",
            HttpField::SourcePort => "SourcePort",
            HttpField::Destination => "Destination",
            HttpField::DestinationPort => "DestinationPort",
            HttpField::TransDepth => "TransDepth",
            HttpField::Version => "Version",
            HttpField::Method => "Method",
            HttpField::Host => "Host",
            HttpField::Uri => "Uri",
            HttpField::Referrer => "Referrer",
            HttpField::UserAgent => "UserAgent",
            HttpField::ReqLen => "ReqLen",
            HttpField::RespLen => "RespLen",
            HttpField::StatusCode => "StatusCode",
            HttpField::StatusMsg => "StatusMsg",
            HttpField::InfoCode => "InfoCode",
            HttpField::InfoMsg => "InfoMsg",
            HttpField::FileName => "FileName",
            HttpField::Tags => "Tags",
            HttpField::UserName => "UserName",
            HttpField::Password => "Password",
            HttpField::Proxied => "Proxied",
            HttpField::OrigFuids => "OrigFuids",
            HttpField::OrigFilenames => "OrigFilenames",
            HttpField::OrigMimeTypes => "OrigMimeTypes",
            HttpField::RespFuids => "RespFuids",
            HttpField::RespFilenames => "RespFilenames",
            HttpField::RespMimeTypes => "RespMimeTypes",
        }
    }

    /// Source-log column name. `None` for [`HttpField::Id`], which the store assigns.
    pub const fn column(self) -> Option<&'static str> {
        match self {
            HttpField::Id => None,
            HttpField::Timestamp => Some("ts"),
            HttpField::Uid => Some("uid"),
            HttpField::Source => Some("id.orig_h"),
            HttpField::SourcePort => Some("id.orig_p"),
            HttpField::Destination => Some("id.resp_h"),
            HttpField::DestinationPort => Some("id.resp_p"),
            other => Some(other.store_name()),
        }
    }

    /// Field name in the persistent document store.
    pub const fn store_name(self) -> &'static str {
        match self {
            HttpField::Id => "_id",
            HttpField::Timestamp => "ts",
            HttpField::Uid => "uid",
            HttpField::Source => "id_origin_h",
            HttpField::SourcePort => "id_origin_p",
            HttpField::Destination => "id_resp_h",
            HttpField::DestinationPort => "id_resp_p",
            HttpField::TransDepth => "trans_depth",
            HttpField::Version => "version",
            HttpField::Method => "method",
            HttpField::Host => "host",
            HttpField::Uri => "uri",
            HttpField::Referrer => "referrer",
            HttpField::UserAgent => "user_agent",
            HttpField::ReqLen => "request_body_len",
            HttpField::RespLen => "response_body_len",
            HttpField::StatusCode => "status_code",
            HttpField::StatusMsg => "status_msg",
            HttpField::InfoCode => "info_code",
            HttpField::InfoMsg => "info_msg",
            HttpField::FileName => "filename",
            HttpField::Tags => "tags",
            HttpField::UserName => "username",
            HttpField::Password => "password",
            HttpField::Proxied => "proxied",
            HttpField::OrigFuids => "orig_fuids",
            HttpField::OrigFilenames => "orig_filenames",
            HttpField::OrigMimeTypes => "orig_mime_types",
            HttpField::RespFuids => "resp_fuids",
            HttpField::RespFilenames => "resp_filenames",
            HttpField::RespMimeTypes => "resp_mime_types",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            HttpField::Id => FieldKind::DocumentId,
            HttpField::Timestamp => FieldKind::Time,
            HttpField::Source | HttpField::Destination => FieldKind::Addr,
            HttpField::SourcePort | HttpField::DestinationPort => FieldKind::Port,
            HttpField::TransDepth
            | HttpField::ReqLen
            | HttpField::RespLen
            | HttpField::StatusCode
            | HttpField::InfoCode => FieldKind::Count,
            HttpField::Tags => FieldKind::SetEnum,
            HttpField::Proxied => FieldKind::SetString,
            HttpField::OrigFuids
            | HttpField::OrigFilenames
            | HttpField::OrigMimeTypes
            | HttpField::RespFuids
            | HttpField::RespFilenames
            | HttpField::RespMimeTypes => FieldKind::VectorString,
            _ => FieldKind::String,
        }
    }

    /// Resolve a source-log column name.
    pub fn from_column(column: &str) -> Option<Self> {
        COLUMNS.get(column).copied()
    }

    /// Resolve a persistent-store field name.
    pub fn from_store_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.store_name() == name)
    }
}

impl fmt::Display for HttpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_field_but_id_has_a_column() {
        for field in HttpField::ALL {
            match field {
                HttpField::Id => assert_eq!(field.column(), None),
                _ => assert!(field.column().is_some(), "{field} has no column"),
            }
        }
    }

    #[test]
    fn column_lookup_covers_every_column() {
        assert_eq!(COLUMNS.len(), HttpField::ALL.len() - 1);
        for field in HttpField::ALL {
            if let Some(column) = field.column() {
                assert_eq!(HttpField::from_column(column), Some(field));
            }
        }
    }

    #[test]
    fn store_names_are_unique() {
        let names: HashSet<_> = HttpField::ALL.iter().map(|f| f.store_name()).collect();
        assert_eq!(names.len(), HttpField::ALL.len());
    }

    #[test]
    fn connection_tuple_names() {
        assert_eq!(HttpField::Source.column(), Some("id.orig_h"));
        assert_eq!(HttpField::Source.store_name(), "id_origin_h");
        assert_eq!(HttpField::DestinationPort.column(), Some("id.resp_p"));
        assert_eq!(HttpField::DestinationPort.store_name(), "id_resp_p");
        assert_eq!(HttpField::from_store_name("id_origin_p"), Some(HttpField::SourcePort));
        assert_eq!(HttpField::from_column("id_origin_p"), None);
    }

    #[test]
    fn type_tags_round_trip() {
        for field in HttpField::ALL {
            let kind = field.kind();
            match kind.type_tag() {
                Some(tag) => assert_eq!(FieldKind::from_type_tag(tag), Some(kind)),
                None => assert_eq!(field, HttpField::Id),
            }
        }
        assert_eq!(FieldKind::from_type_tag("table[string]"), None);
    }
}
