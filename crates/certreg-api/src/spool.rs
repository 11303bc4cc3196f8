//! # Upload Spooling
//!
//! Streams an uploaded multipart file part to a temporary file in the
//! configured upload directory. The file is owned by a [`TempPath`] guard
//! and deleted when the [`SpooledFile`] is dropped, whichever way the
//! request ends.

use std::path::Path;

use axum::extract::multipart::Field;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::extractors::multipart_error;

/// An uploaded file held on disk for the duration of a request.
#[derive(Debug)]
pub struct SpooledFile {
    path: TempPath,
    file_name: String,
    len: u64,
}

impl SpooledFile {
    /// Name the client gave the file part.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of bytes written.
    pub fn size(&self) -> u64 {
        self.len
    }

    /// Read the spooled bytes back into memory.
    pub async fn read(&self) -> Result<Vec<u8>, AppError> {
        tokio::fs::read(&*self.path)
            .await
            .map_err(|e| AppError::Internal(format!("reading spooled upload: {e}")))
    }
}

/// Stream `field` into a new temp file under `dir`.
pub async fn spool(mut field: Field<'_>, dir: &Path, file_name: String) -> Result<SpooledFile, AppError> {
    let named = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(dir)
        .map_err(|e| AppError::Internal(format!("creating spool file in {}: {e}", dir.display())))?;
    let (file, path) = named.into_parts();
    let mut file = tokio::fs::File::from_std(file);

    let mut len = 0u64;
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        len += chunk.len() as u64;
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("writing spool file: {e}")))?;
    }
    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("flushing spool file: {e}")))?;

    tracing::debug!(path = %path.display(), file_name = %file_name, len, "upload spooled");

    Ok(SpooledFile {
        path,
        file_name,
        len,
    })
}
