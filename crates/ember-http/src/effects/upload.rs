//! Multipart body assembly from upload sources.

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncRead;

use crate::core::MultipartWriter;
use crate::data::{FileUpload, UploadSource};
use crate::error::{Error, Result};

/// A finished `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub content_type: String,
    pub body:         Bytes,
}

/// Field name for an upload without an explicit one.
///
/// `ordinal` is the 1-based position among uploads that lack a name.
pub fn default_field_name(total_uploads: usize, ordinal: usize) -> String {
    if total_uploads == 1 {
        "file".to_string()
    } else {
        format!("file{ordinal}")
    }
}

/// Write every upload, then `fields`, into one multipart body.
///
/// Sources are opened one at a time, right before their part is written,
/// and dropped as soon as their copy finishes or fails. The first failure
/// aborts the whole body; sources not reached yet are dropped unread.
pub async fn build_multipart(uploads: Vec<FileUpload>, fields: &[(String, String)]) -> Result<MultipartBody> {
    let mut writer = MultipartWriter::new();
    let total = uploads.len();
    let mut unnamed = 0;

    for upload in uploads {
        let field = match upload.field_name.clone() {
            Some(name) => name,
            None => {
                unnamed += 1;
                default_field_name(total, unnamed)
            }
        };
        write_upload(&mut writer, &field, upload).await?;
    }

    for (name, value) in fields {
        writer.write_field(name, value);
    }

    Ok(MultipartBody {
        content_type: writer.content_type(),
        body:         writer.finish(),
    })
}

async fn write_upload(writer: &mut MultipartWriter, field: &str, upload: FileUpload) -> Result<()> {
    let FileUpload {
        source,
        file_name,
        mime,
        ..
    } = upload;

    let mut reader = open_source(source).await?;

    let sink = match mime.as_deref() {
        Some(mime) => writer.create_file_part(field, file_name.as_deref().unwrap_or("filename"), mime),
        None => writer.create_form_file(field, file_name.as_deref().unwrap_or_default()),
    };
    let copied = tokio::io::copy(&mut reader, sink).await;
    drop(reader);

    copied
        .map(|_| ())
        .map_err(|e| Error::io(format!("failed to read upload for field {field:?}"), e))
}

async fn open_source(source: UploadSource) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
    match source {
        UploadSource::Reader(reader) => Ok(reader),
        UploadSource::Path(path) => {
            let file = File::open(&path)
                .await
                .map_err(|e| Error::io(format!("failed to open upload {}", path.display()), e))?;
            Ok(Box::new(file))
        }
    }
}
