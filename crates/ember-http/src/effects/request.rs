//! Request assembly: query, body, header layering and credentials.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::Method;
use url::Url;

use super::upload::build_multipart;
use crate::core::headers::{
    AUTHORIZATION, CONTENT_TYPE, DEFAULT_USER_AGENT, FORM_URLENCODED, USER_AGENT, X_REQUESTED_WITH,
};
use crate::core::{HeaderSet, build_query, encode_body, wire};
use crate::data::{BasicAuth, RequestOptions};
use crate::error::{Error, Result};

/// Protocol version written in reconstructed request lines.
pub const REQUEST_PROTO: &str = "HTTP/1.1";

/// A fully assembled request, ready for dispatch.
///
/// The body is held in memory so the exact bytes sent can be replayed by
/// [`OutgoingRequest::raw`] at any time.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method:  Method,
    pub url:     Url,
    pub headers: HeaderSet,
    pub body:    Option<Bytes>,
}

impl OutgoingRequest {
    /// Path plus query, as written on the request line.
    pub fn request_uri(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }

    /// Host with the port when it is not the scheme default.
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Wire-format text of this request, body included.
    pub fn raw(&self) -> String {
        wire::format_request(
            self.method.as_str(),
            &self.request_uri(),
            REQUEST_PROTO,
            &self.host(),
            self.headers.iter(),
            self.body.as_deref().unwrap_or_default(),
        )
    }

    /// Build the transport request on `client`.
    pub fn to_reqwest(&self, client: &reqwest::Client) -> Result<reqwest::Request> {
        let mut builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.to_header_map()?);
        if let Some(body) = &self.body {
            builder = builder.body(body.clone());
        }
        Ok(builder.build()?)
    }
}

/// Assemble the request described by `options`.
///
/// Uploads are taken out of `options`; when present they win over
/// `options.body`, which is then ignored.
pub async fn assemble(
    method: Method,
    raw_url: &str,
    options: &mut RequestOptions,
    preset_headers: &[(String, String)],
) -> Result<OutgoingRequest> {
    let url = build_query(raw_url, options.params.as_ref())?;
    let mut headers = HeaderSet::new();
    let mut body = None;

    if !options.uploads.is_empty() {
        if method != Method::POST {
            return Err(Error::Configuration(format!(
                "file uploads require POST, got {method}"
            )));
        }
        let uploads = std::mem::take(&mut options.uploads);
        let multipart = build_multipart(uploads, &options.multipart_fields).await?;
        headers.set(CONTENT_TYPE, multipart.content_type);
        body = Some(multipart.body);
    } else if let Some(plain) = &options.body {
        headers.set(CONTENT_TYPE, FORM_URLENCODED);
        body = Some(encode_body(plain));
    }

    layer_headers(&mut headers, preset_headers, options);

    Ok(OutgoingRequest {
        method,
        url,
        headers,
        body,
    })
}

/// Apply header layers over the body-derived ones, lowest precedence first:
/// presets, per-call headers, credentials, protocol flags, default agent.
pub fn layer_headers(headers: &mut HeaderSet, preset_headers: &[(String, String)], options: &RequestOptions) {
    for (name, value) in preset_headers {
        headers.set(name.as_str(), value.as_str());
    }

    if let Some(call_headers) = &options.headers {
        headers.apply(call_headers);
    }

    if let Some(auth) = &options.basic_auth {
        headers.set(AUTHORIZATION, basic_auth_value(auth));
    }

    if options.ajax {
        headers.set(X_REQUESTED_WITH, "XMLHttpRequest");
    }
    if options.json {
        headers.set(CONTENT_TYPE, "application/json");
    }
    if options.xml {
        headers.set(CONTENT_TYPE, "application/xml");
    }

    if !headers.contains(USER_AGENT) {
        headers.set(USER_AGENT, DEFAULT_USER_AGENT);
    }
}

/// `Basic <base64(user:password)>`
pub fn basic_auth_value(auth: &BasicAuth) -> String {
    let token = STANDARD.encode(format!("{}:{}", auth.user, auth.password));
    format!("Basic {token}")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::{BasicAuth, FileUpload};

    async fn build(method: Method, url: &str, mut options: RequestOptions) -> Result<OutgoingRequest> {
        assemble(method, url, &mut options, &[]).await
    }

    #[tokio::test]
    async fn test_get_merges_query() {
        let req = build(
            Method::GET,
            "https://example.com/x?y=2",
            RequestOptions::default().params("id=1"),
        )
        .await
        .unwrap();

        let pairs: Vec<_> = req.url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("id".to_string(), "1".to_string())));
        assert!(pairs.contains(&("y".to_string(), "2".to_string())));
        assert_eq!(req.body, None);
    }

    #[tokio::test]
    async fn test_form_body_sets_content_type() {
        let req = build(
            Method::POST,
            "http://h/post",
            RequestOptions::default().body(BTreeMap::from([("foo", "bar")])),
        )
        .await
        .unwrap();

        assert_eq!(req.headers.get("Content-Type"), Some(FORM_URLENCODED));
        assert_eq!(req.body.as_deref(), Some(&b"foo=bar"[..]));
    }

    #[tokio::test]
    async fn test_call_headers_override_body_content_type() {
        let req = build(
            Method::POST,
            "http://h/",
            RequestOptions::default()
                .body("{\"a\":1}")
                .headers("content-type: text/plain\r\n"),
        )
        .await
        .unwrap();

        assert_eq!(req.headers.get("Content-Type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_header_precedence() {
        let preset = vec![
            ("User-Agent".to_string(), "preset-agent".to_string()),
            ("X-Preset".to_string(), "p".to_string()),
            ("X-Shared".to_string(), "preset".to_string()),
        ];
        let mut options = RequestOptions::default()
            .headers(vec![("X-Shared", "call")])
            .ajax(true)
            .json(true);

        let req = assemble(Method::GET, "http://h/", &mut options, &preset)
            .await
            .unwrap();

        assert_eq!(req.headers.get("User-Agent"), Some("preset-agent"));
        assert_eq!(req.headers.get("X-Preset"), Some("p"));
        assert_eq!(req.headers.get("X-Shared"), Some("call"));
        assert_eq!(req.headers.get("X-Requested-With"), Some("XMLHttpRequest"));
        assert_eq!(req.headers.get("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_xml_wins_over_json() {
        let req = build(Method::GET, "http://h/", RequestOptions::default().json(true).xml(true))
            .await
            .unwrap();
        assert_eq!(req.headers.get("Content-Type"), Some("application/xml"));
    }

    #[tokio::test]
    async fn test_default_user_agent() {
        let req = build(Method::GET, "http://h/", RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(req.headers.get("User-Agent"), Some(DEFAULT_USER_AGENT));
        assert!(DEFAULT_USER_AGENT.starts_with("ember-http/"));
    }

    #[tokio::test]
    async fn test_basic_auth_header() {
        let req = build(
            Method::GET,
            "http://h/",
            RequestOptions::default().basic_auth("user", "pass"),
        )
        .await
        .unwrap();

        let value = req.headers.get("Authorization").unwrap();
        let token = value.strip_prefix("Basic ").unwrap();
        assert_eq!(STANDARD.decode(token).unwrap(), b"user:pass");
    }

    #[tokio::test]
    async fn test_basic_auth_wrong_arity_sets_nothing() {
        for parts in [vec!["only"], vec!["a", "b", "c"]] {
            let mut options = RequestOptions::default();
            options.basic_auth = BasicAuth::from_parts(&parts);

            let req = build(Method::GET, "http://h/", options).await.unwrap();
            assert!(!req.headers.contains("Authorization"));
        }
    }

    #[tokio::test]
    async fn test_uploads_win_over_body() {
        let options = RequestOptions::default()
            .body("ignored")
            .upload(FileUpload::reader(&b"payload"[..]).file_name("a.txt"));

        let req = build(Method::POST, "http://h/up", options).await.unwrap();
        let body = String::from_utf8_lossy(req.body.as_deref().unwrap()).into_owned();

        assert!(
            req.headers
                .get("Content-Type")
                .unwrap()
                .starts_with("multipart/form-data; boundary=")
        );
        assert!(body.contains("payload"));
        assert!(!body.contains("ignored"));
        assert!(body.contains("Content-Type: text/plain"));
    }

    #[tokio::test]
    async fn test_uploads_require_post() {
        let options = RequestOptions::default().upload(FileUpload::reader(&b"x"[..]));
        let err = build(Method::PUT, "http://h/", options).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_raw_request() {
        let req = build(
            Method::POST,
            "http://example.com:8080/submit?b=2",
            RequestOptions::default()
                .params(vec![("a", "1")])
                .body("xxxx")
                .headers(vec![("User-Agent", "test")]),
        )
        .await
        .unwrap();

        assert_eq!(
            req.raw(),
            "POST /submit?a=1&b=2 HTTP/1.1\r\n\
             Host: example.com:8080\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\
             User-Agent: test\r\n\
             \r\n\
             xxxx"
        );
    }

    #[tokio::test]
    async fn test_to_reqwest() {
        let req = build(Method::POST, "http://h/p", RequestOptions::default().body("abc"))
            .await
            .unwrap();
        let client = reqwest::Client::new();
        let built = req.to_reqwest(&client).unwrap();

        assert_eq!(built.method(), Method::POST);
        assert_eq!(built.url().as_str(), "http://h/p");
        assert_eq!(built.headers()["content-type"], FORM_URLENCODED);
        assert_eq!(built.body().and_then(|b| b.as_bytes()), Some(&b"abc"[..]));
    }
}
