//! Case-preserving header set and the text/mapping header parsers.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::data::Headers;
use crate::error::{Error, Result};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const USER_AGENT: &str = "User-Agent";
pub const AUTHORIZATION: &str = "Authorization";
pub const X_REQUESTED_WITH: &str = "X-Requested-With";

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Ordered headers, one value per name.
///
/// Names compare case-insensitively but keep the case they were last set
/// with, so the raw request shows exactly what the caller supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self { Self::default() }

    /// Set `name` to `value`, replacing an existing entry in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx] = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .map(|idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool { self.position(name).is_some() }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name)
            .map(|idx| self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Apply caller headers with set semantics.
    pub fn apply(&mut self, headers: &Headers) {
        match headers {
            Headers::Map(pairs) => {
                for (name, value) in pairs {
                    self.set(name.as_str(), value.as_str());
                }
            }
            Headers::Text(raw) => {
                for (name, value) in parse_header_text(raw) {
                    self.set(name, value);
                }
            }
        }
    }

    /// Convert into the transport's header map.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::parameter("header", format!("invalid header name {name:?}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| Error::parameter("header", format!("invalid value for header {name:?}")))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

/// Parse `Key: Value` lines separated by CRLF or a bare LF.
///
/// Each line is split on its first colon and both halves are trimmed.
/// Lines without a colon, with an empty key, or whose name or value is not
/// a valid HTTP token are skipped.
pub fn parse_header_text(raw: &str) -> Vec<(String, String)> {
    raw.lines()
        .filter_map(|line| {
            let parsed = line
                .split_once(':')
                .map(|(k, v)| (k.trim(), v.trim()))
                .filter(|(k, v)| is_valid_header(k, v));
            if parsed.is_none() && !line.trim().is_empty() {
                tracing::trace!(line, "skipping malformed header line");
            }
            parsed.map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect()
}

fn is_valid_header(name: &str, value: &str) -> bool {
    !name.is_empty() && HeaderName::from_bytes(name.as_bytes()).is_ok() && HeaderValue::from_str(value).is_ok()
}
