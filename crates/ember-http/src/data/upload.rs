use std::fmt;
use std::path::{Path, PathBuf};

use tokio::io::AsyncRead;

/// Where the bytes of an upload come from.
pub enum UploadSource {
    /// Opened right before its part is written.
    Path(PathBuf),
    /// Already-open stream, read to the end and then dropped.
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            UploadSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// One file of a multipart upload.
///
/// # Examples
///
/// ```
/// use ember_http::FileUpload;
///
/// let upload = FileUpload::path("/etc/hosts")
///     .field_name("hosts")
///     .mime("text/plain");
/// ```
#[derive(Debug)]
pub struct FileUpload {
    pub source:     UploadSource,
    /// Name announced in `Content-Disposition`.
    pub file_name:  Option<String>,
    /// Form field. Derived from the upload position when absent.
    pub field_name: Option<String>,
    /// Explicit part content type.
    pub mime:       Option<String>,
}

impl FileUpload {
    /// Upload the file at `path`; its last component becomes the file name.
    pub fn path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            file_name:  path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            source:     UploadSource::Path(path.to_path_buf()),
            field_name: None,
            mime:       None,
        }
    }

    /// Upload everything `reader` yields.
    pub fn reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            source:     UploadSource::Reader(Box::new(reader)),
            file_name:  None,
            field_name: None,
            mime:       None,
        }
    }

    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    #[must_use]
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}
