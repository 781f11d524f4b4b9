//! Host allow-list.
//!
//! Entries are matched by substring, so an operator can list either a full
//! hostname (`cdn.example.com`) or a parent-domain fragment (`example.com`).
//! Matching is byte-wise and case-sensitive; normalize case on both sides
//! beforehand if that is wanted.

use crate::types::HttpEntry;
use serde::Deserialize;

impl HttpEntry {
    /// Whether this entry's `Host` contains any of the `allow_list` substrings.
    ///
    /// Always `false` for a missing list or an empty `Host`.
    pub fn is_allowed<S: AsRef<str>>(&self, allow_list: Option<&[S]>) -> bool {
        let Some(allow_list) = allow_list else {
            return false;
        };
        if self.host.is_empty() {
            return false;
        }
        allow_list
            .iter()
            .any(|fragment| self.host.contains(fragment.as_ref()))
    }
}

/// Owned allow-list, as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AllowList {
    hosts: Vec<String>,
}

impl AllowList {
    pub fn new(hosts: Vec<String>) -> Self {
        Self { hosts }
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Add a host fragment unless it is already listed.
    pub fn push(&mut self, host: impl Into<String>) {
        let host = host.into();
        if !self.hosts.contains(&host) {
            self.hosts.push(host);
        }
    }

    pub fn matches(&self, entry: &HttpEntry) -> bool {
        entry.is_allowed(Some(self.hosts.as_slice()))
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = AllowList::default();
        for host in iter {
            list.push(host);
        }
        list
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
