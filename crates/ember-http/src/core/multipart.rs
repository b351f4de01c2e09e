//! In-memory `multipart/form-data` writer.
//!
//! Parts are appended to a single buffer so the finished body can be
//! replayed for diagnostics after it has been sent.

use bytes::Bytes;

/// Escape `\` and `"` for a quoted `Content-Disposition` parameter.
pub fn escape_quotes(s: &str) -> String { s.replace('\\', "\\\\").replace('"', "\\\"") }

/// Random 60 hex character boundary.
pub fn random_boundary() -> String { hex::encode(rand::random::<[u8; 30]>()) }

/// Content type for a file part that carries no explicit MIME type.
pub fn guess_mime(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[derive(Debug)]
pub struct MultipartWriter {
    boundary: String,
    buf:      Vec<u8>,
    parts:    usize,
}

impl Default for MultipartWriter {
    fn default() -> Self { Self::new() }
}

impl MultipartWriter {
    pub fn new() -> Self { Self::with_boundary(random_boundary()) }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf:      Vec::new(),
            parts:    0,
        }
    }

    pub fn boundary(&self) -> &str { &self.boundary }

    /// `multipart/form-data; boundary=...`
    pub fn content_type(&self) -> String { format!("multipart/form-data; boundary={}", self.boundary) }

    /// Start a part with the given headers and return the sink its content
    /// is written to. The sink is only valid until the next part starts.
    pub fn create_part(&mut self, headers: &[(&str, &str)]) -> &mut Vec<u8> {
        if self.parts > 0 {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.parts += 1;

        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        for (name, value) in headers {
            self.buf.extend_from_slice(name.as_bytes());
            self.buf.extend_from_slice(b": ");
            self.buf.extend_from_slice(value.as_bytes());
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf.extend_from_slice(b"\r\n");
        &mut self.buf
    }

    /// File part with an explicit content type.
    pub fn create_file_part(&mut self, field: &str, file_name: &str, content_type: &str) -> &mut Vec<u8> {
        let disposition = format!(
            r#"form-data; name="{}"; filename="{}""#,
            escape_quotes(field),
            escape_quotes(file_name)
        );
        self.create_part(&[
            ("Content-Disposition", disposition.as_str()),
            ("Content-Type", content_type),
        ])
    }

    /// File part whose content type is inferred from `file_name`.
    pub fn create_form_file(&mut self, field: &str, file_name: &str) -> &mut Vec<u8> {
        let content_type = guess_mime(file_name);
        self.create_file_part(field, file_name, &content_type)
    }

    /// Plain form field.
    pub fn write_field(&mut self, name: &str, value: &str) {
        let disposition = format!(r#"form-data; name="{}""#, escape_quotes(name));
        self.create_part(&[("Content-Disposition", disposition.as_str())])
            .extend_from_slice(value.as_bytes());
    }

    /// Append the closing boundary and return the body.
    pub fn finish(mut self) -> Bytes {
        if self.parts > 0 {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"--\r\n");
        Bytes::from(self.buf)
    }
}
