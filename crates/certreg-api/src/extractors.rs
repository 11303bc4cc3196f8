//! # Request Extraction Helpers
//!
//! Handlers take extractor results as `Result<_, Rejection>` and pass them
//! through these helpers so every malformed request produces the same
//! `{"error": ...}` body as the rest of the API instead of Axum's plain-text
//! rejection.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;
use crate::spool::{spool, SpooledFile};

/// Name of the multipart part carrying the document.
pub const FILE_FIELD: &str = "file";

/// File name recorded when the client sends none.
pub const UNNAMED_FILE: &str = "unnamed";

/// Unwrap a JSON body, mapping rejections to [`AppError`].
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge(rejection.body_text()))
        }
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// Map a multipart stream error, keeping body-limit violations distinct.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// A parsed upload form: the spooled `file` part plus every text field.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<SpooledFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Value of a text field, or `""` when absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Read a multipart upload, spooling the `file` part to `upload_dir`.
///
/// Only the first `file` part is kept. Parts without a name are skipped.
pub async fn read_upload_form(
    multipart: Result<Multipart, MultipartRejection>,
    upload_dir: &Path,
) -> Result<UploadForm, AppError> {
    let mut multipart = multipart.map_err(|r| AppError::BadRequest(r.body_text()))?;
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == FILE_FIELD {
            if form.file.is_some() {
                continue;
            }
            let file_name = field
                .file_name()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(UNNAMED_FILE)
                .to_owned();
            form.file = Some(spool(field, upload_dir, file_name).await?);
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
