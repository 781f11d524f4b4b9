//! Field registry and store document harness.
//!
//! # What this covers
//!
//! - **Registry snapshot**: every field with its column name, store name and
//!   kind, pinned with an inline `insta` snapshot.
//! - **Unset id**: a document without a store id has no `_id` key.
//! - **Property: store round-trip**: any entry written as a document reads
//!   back unchanged.
//!
//! # Running
//!
//! ```sh
//! cargo test --test schema_harness
//! ```

mod common;
use chrono::{DateTime, Utc};
use common::*;
use httpnorm::{read_document, DocumentId, HttpEntry, HttpField};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::net::IpAddr;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn registry_snapshot() {
    let registry = HttpField::ALL
        .iter()
        .map(|f| {
            format!(
                "{} {} {} {}",
                f.name(),
                f.column().unwrap_or("-"),
                f.store_name(),
                f.kind()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(registry, @r"
    Id - _id document_id
    Timestamp ts ts time
    Uid uid uid string
    Source id.orig_h id_origin_h addr
    SourcePort id.orig_p id_origin_p port
    Destination id.resp_h id_resp_h addr
    DestinationPort id.resp_p id_resp_p port
    TransDepth trans_depth trans_depth count
    Version version version string
    Method method method string
    Host host host string
    Uri uri uri string
    Referrer referrer referrer string
    UserAgent user_agent user_agent string
    ReqLen request_body_len request_body_len count
    RespLen response_body_len response_body_len count
    StatusCode status_code status_code count
    StatusMsg status_msg status_msg string
    InfoCode info_code info_code count
    InfoMsg info_msg info_msg string
    FileName filename filename string
    Tags tags tags set[enum]
    UserName username username string
    Password password password string
    Proxied proxied proxied set[string]
    OrigFuids orig_fuids orig_fuids vector[string]
    OrigFilenames orig_filenames orig_filenames vector[string]
    OrigMimeTypes orig_mime_types orig_mime_types vector[string]
    RespFuids resp_fuids resp_fuids vector[string]
    RespFilenames resp_filenames resp_filenames vector[string]
    RespMimeTypes resp_mime_types resp_mime_types vector[string]
    ");
}

#[test]
fn unset_id_is_omitted() {
    let doc = serde_json::to_value(http_entry("example.com", "/")).unwrap();
    assert!(doc.get("_id").is_none());
    assert_eq!(doc["id_origin_h"], "141.142.220.118");
    assert_eq!(doc["id_resp_p"], 80);
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

fn text() -> impl Strategy<Value = String> {
    "[ -~]{0,16}"
}

fn entry_strategy() -> impl Strategy<Value = HttpEntry> {
    let ids = proptest::option::of("[0-9a-f]{24}".prop_map(|id| DocumentId::new(id)));
    // Micros below 2^51 keep `ts` exact through an f64.
    let timestamps = (0i64..2_000_000_000_000_000).prop_map(|micros| {
        DateTime::<Utc>::from_timestamp_micros(micros).unwrap()
    });
    let endpoints = (
        any::<IpAddr>(),
        any::<u16>(),
        any::<IpAddr>(),
        any::<u16>(),
    );
    let counters = (any::<u64>(), any::<u64>(), any::<u64>(), any::<u16>(), any::<u16>());
    let request = (text(), text(), text(), text(), text(), text(), text());
    let reply = (text(), text(), text(), text(), text(), text(), text());
    let files = (text(), text(), text(), text(), text(), text());

    (ids, timestamps, endpoints, counters, request, reply, files).prop_map(
        |(id, timestamp, endpoints, counters, request, reply, files)| {
            let (source, source_port, destination, destination_port) = endpoints;
            let (trans_depth, req_len, resp_len, status_code, info_code) = counters;
            let (uid, version, method, host, uri, referrer, user_agent) = request;
            let (status_msg, info_msg, file_name, tags, user_name, password, proxied) = reply;
            let (orig_fuids, orig_filenames, orig_mime_types, resp_fuids, resp_filenames, resp_mime_types) =
                files;
            HttpEntry {
                id,
                timestamp,
                uid,
                source,
                source_port,
                destination,
                destination_port,
                trans_depth,
                version,
                method,
                host,
                uri,
                referrer,
                user_agent,
                req_len,
                resp_len,
                status_code,
                status_msg,
                info_code,
                info_msg,
                file_name,
                tags,
                user_name,
                password,
                proxied,
                orig_fuids,
                orig_filenames,
                orig_mime_types,
                resp_fuids,
                resp_filenames,
                resp_mime_types,
            }
        },
    )
}

proptest! {
    #[test]
    fn documents_round_trip(entry in entry_strategy()) {
        let line = serde_json::to_string(&entry).unwrap();
        let back = read_document(&line).unwrap();
        prop_assert_eq!(back, entry);
    }
}
