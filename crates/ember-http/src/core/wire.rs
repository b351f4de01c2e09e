//! Raw HTTP/1.1 text reconstruction used for diagnostics.

use std::fmt::Write;

/// `<method> <uri> <proto>`, `Host`, one `Key: Value` per header, a blank
/// line, then the body (lossy UTF-8).
pub fn format_request<'a>(
    method: &str,
    request_uri: &str,
    proto: &str,
    host: &str,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    body: &[u8],
) -> String {
    let mut raw = format!("{method} {request_uri} {proto}\r\nHost: {host}\r\n");
    for (name, value) in headers {
        let _ = write!(raw, "{name}: {value}\r\n");
    }
    raw.push_str("\r\n");
    raw.push_str(&String::from_utf8_lossy(body));
    raw
}

/// `<proto> <status>`, one `Key:Value ` line per header entry, a blank
/// line, then the body (lossy UTF-8).
pub fn format_response<'a>(
    proto: &str,
    status: &str,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    body: &[u8],
) -> String {
    let mut raw = format!("{proto} {status}\r\n");
    for (name, value) in headers {
        let _ = write!(raw, "{name}:{value} \r\n");
    }
    raw.push_str("\r\n");
    raw.push_str(&String::from_utf8_lossy(body));
    raw
}

/// `Key: Value` lines joined by CRLF, no trailing line break.
pub fn format_header_lines<'a>(headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    headers
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\r\n")
}
