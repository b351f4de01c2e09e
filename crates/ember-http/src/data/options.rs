use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use super::upload::FileUpload;
use crate::error::{Error, Result};

/// Default bound for a whole exchange when the caller sets none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Query parameters merged into the target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params {
    /// An already-encoded query string. Pairs are appended to the
    /// existing query, repeated keys are kept.
    Text(String),

    /// Each key replaces any existing value of the same key.
    Map(Vec<(String, String)>),

    /// Pairs flattened from a structured record, appended like `Text`.
    Record(Vec<(String, String)>),
}

impl Params {
    /// Flatten a serializable record into query pairs.
    ///
    /// Fails with [`Error::ParameterType`] for values that have no flat
    /// query representation (nested maps, sequences of records, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use ember_http::Params;
    ///
    /// #[derive(serde::Serialize)]
    /// struct Search {
    ///     q:    &'static str,
    ///     page: u32,
    /// }
    ///
    /// let params = Params::record(&Search { q: "rust", page: 2 }).unwrap();
    /// assert_eq!(
    ///     params,
    ///     Params::Record(vec![("q".into(), "rust".into()), ("page".into(), "2".into())])
    /// );
    /// ```
    pub fn record<T: Serialize + ?Sized>(record: &T) -> Result<Self> {
        let encoded =
            serde_urlencoded::to_string(record).map_err(|e| Error::parameter("query", e.to_string()))?;
        let pairs = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        Ok(Params::Record(pairs))
    }
}

impl From<&str> for Params {
    fn from(query: &str) -> Self { Params::Text(query.to_string()) }
}

impl From<String> for Params {
    fn from(query: String) -> Self { Params::Text(query) }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Params {
    fn from(map: HashMap<K, V>) -> Self { Params::Map(into_pairs(map)) }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Params {
    fn from(map: BTreeMap<K, V>) -> Self { Params::Map(into_pairs(map)) }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Params {
    fn from(pairs: Vec<(K, V)>) -> Self { Params::Map(into_pairs(pairs)) }
}

/// Request headers supplied for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Headers {
    /// Raw `Key: Value` lines separated by CRLF or LF. Lines that do not
    /// parse into a valid header are skipped.
    Text(String),

    /// Each key replaces any header of the same name.
    Map(Vec<(String, String)>),
}

impl From<&str> for Headers {
    fn from(raw: &str) -> Self { Headers::Text(raw.to_string()) }
}

impl From<String> for Headers {
    fn from(raw: String) -> Self { Headers::Text(raw) }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Headers {
    fn from(map: HashMap<K, V>) -> Self { Headers::Map(into_pairs(map)) }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Headers {
    fn from(map: BTreeMap<K, V>) -> Self { Headers::Map(into_pairs(map)) }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Headers {
    fn from(pairs: Vec<(K, V)>) -> Self { Headers::Map(into_pairs(pairs)) }
}

/// A plain (non-multipart) request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Bytes(Bytes),
    /// Form fields, sent `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl From<&str> for Body {
    fn from(text: &str) -> Self { Body::Text(text.to_string()) }
}

impl From<String> for Body {
    fn from(text: String) -> Self { Body::Text(text) }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self { Body::Bytes(Bytes::from(bytes)) }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self { Body::Bytes(bytes) }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Body {
    fn from(map: HashMap<K, V>) -> Self { Body::Form(into_pairs(map)) }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Body {
    fn from(map: BTreeMap<K, V>) -> Self { Body::Form(into_pairs(map)) }
}

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user:     String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user:     user.into(),
            password: password.into(),
        }
    }

    /// Build credentials from a `[user, password]` slice.
    ///
    /// Any other length yields `None`, so the request carries no
    /// `Authorization` header at all.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Option<Self> {
        match parts {
            [user, password] => Some(Self::new(user.as_ref(), password.as_ref())),
            _ => None,
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Per-call options. Consumed by the call that receives them.
///
/// # Examples
///
/// ```
/// use ember_http::RequestOptions;
/// use std::time::Duration;
///
/// let options = RequestOptions::default()
///     .params("id=1")
///     .headers("Cookie: xxxx\r\n")
///     .timeout(Duration::from_secs(10))
///     .ajax(true)
///     .disable_redirect(true);
/// ```
#[derive(Default)]
pub struct RequestOptions {
    pub params:  Option<Params>,
    pub headers: Option<Headers>,
    pub body:    Option<Body>,

    /// Files sent as `multipart/form-data`. Takes precedence over `body`.
    pub uploads: Vec<FileUpload>,

    /// Scalar fields written after the files of a multipart body.
    pub multipart_fields: Vec<(String, String)>,

    /// Bound for the whole exchange, redirects included.
    ///
    /// Default: 60s
    pub timeout: Option<Duration>,

    pub disable_redirect:     bool,
    pub disable_compression:  bool,
    pub insecure_skip_verify: bool,

    /// Keep cookies across the redirects of this call.
    pub use_cookie_jar: bool,

    /// Jar used when `use_cookie_jar` is set; a fresh one otherwise.
    pub cookie_jar: Option<Arc<reqwest::cookie::Jar>>,

    pub basic_auth: Option<BasicAuth>,

    /// Adds `X-Requested-With: XMLHttpRequest`.
    pub ajax: bool,
    /// Forces `Content-Type: application/json`.
    pub json: bool,
    /// Forces `Content-Type: application/xml`.
    pub xml:  bool,

    /// Session used instead of one built from the client configuration.
    pub http_client: Option<reqwest::Client>,
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("uploads", &self.uploads)
            .field("multipart_fields", &self.multipart_fields)
            .field("timeout", &self.timeout)
            .field("disable_redirect", &self.disable_redirect)
            .field("disable_compression", &self.disable_compression)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("use_cookie_jar", &self.use_cookie_jar)
            .field("basic_auth", &self.basic_auth)
            .field("ajax", &self.ajax)
            .field("json", &self.json)
            .field("xml", &self.xml)
            .field("http_client", &self.http_client.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl RequestOptions {
    #[must_use]
    pub fn params(mut self, params: impl Into<Params>) -> Self {
        self.params = Some(params.into());
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn upload(mut self, upload: FileUpload) -> Self {
        self.uploads.push(upload);
        self
    }

    #[must_use]
    pub fn multipart_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.multipart_fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn disable_redirect(mut self, disable: bool) -> Self {
        self.disable_redirect = disable;
        self
    }

    #[must_use]
    pub fn disable_compression(mut self, disable: bool) -> Self {
        self.disable_compression = disable;
        self
    }

    #[must_use]
    pub fn insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.insecure_skip_verify = insecure;
        self
    }

    #[must_use]
    pub fn use_cookie_jar(mut self, enabled: bool) -> Self {
        self.use_cookie_jar = enabled;
        self
    }

    /// Use `jar` for this call. Implies `use_cookie_jar(true)`.
    #[must_use]
    pub fn cookie_jar(mut self, jar: Arc<reqwest::cookie::Jar>) -> Self {
        self.use_cookie_jar = true;
        self.cookie_jar = Some(jar);
        self
    }

    #[must_use]
    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth::new(user, password));
        self
    }

    #[must_use]
    pub fn ajax(mut self, ajax: bool) -> Self {
        self.ajax = ajax;
        self
    }

    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn xml(mut self, xml: bool) -> Self {
        self.xml = xml;
        self
    }

    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn effective_timeout(&self) -> Duration { self.timeout.unwrap_or(DEFAULT_TIMEOUT) }
}

fn into_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(String, String)>
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
