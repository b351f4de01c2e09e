//! Response facade over one completed exchange.

use std::borrow::Cow;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{StatusCode, Version};
use url::Url;

use super::request::OutgoingRequest;
use crate::core::{Cookie, parse_set_cookie, wire};
use crate::error::Result;

/// A boxed stream type for response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status, headers and a single-use body.
///
/// Status, headers and cookies can be read any number of times. The body is
/// a stream: [`text`](Self::text), [`bytes`](Self::bytes) and
/// [`raw_http_response`](Self::raw_http_response) read whatever is left of
/// it, so a second full read yields empty content. [`read_n`](Self::read_n)
/// takes a prefix and leaves the rest for the next accessor.
pub struct Response {
    request: OutgoingRequest,
    status:  StatusCode,
    /// Reason phrase as sent, when it differs from the canonical one.
    reason:  Option<String>,
    version: Version,
    url:     Url,
    headers: HeaderMap,
    body:    Option<BoxStream<'static, reqwest::Result<Bytes>>>,
    pending: BytesMut,
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("version", &self.version)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body_consumed", &self.body.is_none())
            .finish()
    }
}

impl Response {
    pub(crate) fn from_reqwest(request: OutgoingRequest, response: reqwest::Response) -> Self {
        let status = response.status();
        let version = response.version();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
        Self::from_parts(request, status, version, url, headers, Box::pin(response.bytes_stream())).with_reason(reason)
    }

    pub(crate) fn from_parts(
        request: OutgoingRequest,
        status: StatusCode,
        version: Version,
        url: Url,
        headers: HeaderMap,
        body: BoxStream<'static, reqwest::Result<Bytes>>,
    ) -> Self {
        Self {
            request,
            status,
            reason: None,
            version,
            url,
            headers,
            body: Some(body),
            pending: BytesMut::new(),
        }
    }

    pub(crate) fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub fn status_code(&self) -> u16 { self.status.as_u16() }

    /// Code plus reason phrase, e.g. `200 OK`. The phrase is the one the
    /// server sent; when it sent the canonical phrase or none, the canonical
    /// one is used.
    pub fn status(&self) -> String {
        match self.reason.as_deref().or(self.status.canonical_reason()) {
            Some(reason) => format!("{} {reason}", self.status.as_str()),
            None => self.status.as_str().to_string(),
        }
    }

    pub fn version(&self) -> Version { self.version }

    /// Final URL, after any redirects that were followed.
    pub fn url(&self) -> &Url { &self.url }

    /// Every header entry, duplicates included.
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// `Key: Value` lines joined by CRLF.
    pub fn raw_headers(&self) -> String {
        let lines = header_pairs(&self.headers);
        wire::format_header_lines(lines.iter().map(|(k, v)| (*k, v.as_ref())))
    }

    /// Cookies announced by `Set-Cookie`; unparsable values are skipped.
    pub fn cookies(&self) -> Vec<Cookie> {
        self.set_cookie_values()
            .filter_map(parse_set_cookie)
            .collect()
    }

    /// One `Set-Cookie: <raw>` line per parsable cookie.
    pub fn raw_cookies(&self) -> String {
        self.cookies()
            .iter()
            .map(|cookie| format!("Set-Cookie: {}\r\n", cookie.raw))
            .collect()
    }

    fn set_cookie_values(&self) -> impl Iterator<Item = &str> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
    }

    /// The rest of the body.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        if let Some(mut body) = self.body.take() {
            while let Some(chunk) = body.next().await {
                self.pending.extend_from_slice(&chunk?);
            }
        }
        Ok(self.pending.split().freeze())
    }

    /// The rest of the body as lossy UTF-8.
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Up to `n` bytes; shorter only when the body ends first.
    pub async fn read_n(&mut self, n: usize) -> Result<Bytes> {
        while self.pending.len() < n {
            let Some(body) = self.body.as_mut() else { break };
            match body.next().await {
                Some(chunk) => self.pending.extend_from_slice(&chunk?),
                None => self.body = None,
            }
        }
        let take = n.min(self.pending.len());
        Ok(self.pending.split_to(take).freeze())
    }

    /// The request this call assembled, exactly as sent, body included.
    ///
    /// When redirects were followed this is still the first request of the
    /// chain; [`url`](Self::url) gives the final target. The follow-up
    /// requests are built by the transport and are not replayed here.
    pub fn raw_http_request(&self) -> String { self.request.raw() }

    /// Status line, headers and the rest of the body. Consumes the body.
    pub async fn raw_http_response(&mut self) -> Result<String> {
        let body = self.bytes().await?;
        let proto = format!("{:?}", self.version);
        let lines = header_pairs(&self.headers);
        Ok(wire::format_response(
            &proto,
            &self.status(),
            lines.iter().map(|(k, v)| (*k, v.as_ref())),
            &body,
        ))
    }

    /// Drop the body stream and anything buffered from it.
    pub fn close(&mut self) {
        self.body = None;
        self.pending.clear();
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(&str, Cow<'_, str>)> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes())))
        .collect()
}
