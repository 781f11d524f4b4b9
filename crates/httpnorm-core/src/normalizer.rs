//! Normalizer: rewrites the request URI of a freshly parsed [`HttpEntry`].
//!
//! The monitor writes whatever appeared on the request line. Proxy requests
//! carry an absolute URI (`http://host/path?q`), CONNECT and TLS passthrough
//! carry `host:port`, and some lines carry garbage. After normalization the
//! URI is either empty or a relative request-target:
//!
//! 1. A URI that starts with the `Host` header value is cleared.
//! 2. A URI that does not parse as a URI reference is cleared.
//! 3. An absolute URI is replaced by its path and query (fragment dropped,
//!    empty path becomes `/`). A request-target that starts with `Host` is
//!    cleared as in rule 1.
//! 4. A relative reference is kept as-is.

use crate::types::HttpEntry;
use std::any::Any;
use tracing::debug;
use url::Url;

/// Base used only to check that a relative reference resolves.
const RESOLVE_BASE: &str = "http://localhost/";

/// Outcome of parsing a request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reference {
    /// Absolute URI, reduced to its request-target.
    Absolute(String),
    Relative,
    Invalid,
}

impl HttpEntry {
    /// Normalize [`HttpEntry::uri`] in place. No other field is touched.
    pub fn normalize(&mut self) {
        if self.echoes_host(&self.uri) {
            debug!(uid = %self.uid, host = %self.host, uri = %self.uri, "uri echoes host, clearing");
            self.uri.clear();
            return;
        }

        match parse_reference(&self.uri) {
            // A Host starting with `/` can prefix the reduced target.
            Reference::Absolute(target) if self.echoes_host(&target) => {
                debug!(uid = %self.uid, host = %self.host, uri = %self.uri, "request-target echoes host, clearing");
                self.uri.clear();
            }
            Reference::Absolute(target) => self.uri = target,
            Reference::Relative => {}
            Reference::Invalid => {
                debug!(uid = %self.uid, uri = %self.uri, "unparseable uri, clearing");
                self.uri.clear();
            }
        }
    }

    /// An empty Host never matches; otherwise every URI would be cleared.
    fn echoes_host(&self, uri: &str) -> bool {
        !self.host.is_empty() && uri.starts_with(self.host.as_str())
    }
}

/// Normalize a record handed over by a pipeline that dispatches on record kind.
///
/// # Panics
///
/// Panics if `record` is not an [`HttpEntry`]. That is a wiring error in the
/// caller, not a data error.
pub fn process_record(record: &mut dyn Any) {
    match record.downcast_mut::<HttpEntry>() {
        Some(entry) => entry.normalize(),
        None => panic!("process_record was handed a record that is not an HttpEntry"),
    }
}

fn parse_reference(uri: &str) -> Reference {
    if !has_valid_bytes(uri) {
        return Reference::Invalid;
    }

    match Url::parse(uri) {
        // Opaque URIs (`mailto:`, `urn:`) have no request-target.
        Ok(url) if url.cannot_be_a_base() => Reference::Invalid,
        Ok(url) => {
            // `http://h//[x` yields `//[x`, which would not survive a second pass.
            let target = request_target(&url);
            if has_valid_bytes(&target) && is_valid_relative(&target) {
                Reference::Absolute(target)
            } else {
                Reference::Invalid
            }
        }
        Err(url::ParseError::RelativeUrlWithoutBase) if is_valid_relative(uri) => {
            Reference::Relative
        }
        Err(_) => Reference::Invalid,
    }
}

fn request_target(url: &Url) -> String {
    let path = url.path();
    let mut target = String::with_capacity(path.len() + 1);
    if path.is_empty() {
        target.push('/');
    } else {
        target.push_str(path);
    }
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// No control bytes, and every `%` starts a two-digit hex escape.
fn has_valid_bytes(uri: &str) -> bool {
    let bytes = uri.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b if b.is_ascii_control() => return false,
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
            }
            _ => i += 1,
        }
    }
    true
}

fn is_valid_relative(reference: &str) -> bool {
    if reference.starts_with(':') {
        return false;
    }
    // A colon in the first segment would read as a scheme delimiter.
    let first_segment = reference.split(['/', '?', '#']).next().unwrap_or_default();
    if first_segment.contains(':') {
        return false;
    }
    Url::parse(RESOLVE_BASE)
        .and_then(|base| base.join(reference))
        .is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
