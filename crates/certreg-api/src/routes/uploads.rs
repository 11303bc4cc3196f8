//! # Certificate Uploads
//!
//! Routes:
//! - POST /subir-certificado: multipart `file` + `wallet`
//! - POST /guardar-titulo: multipart `file` + `wallet` + `hash`
//!
//! Both run the same [`crate::services::UploadWorkflow`]. The file part is
//! spooled to the upload directory and removed when the handler returns.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{logged, rejected};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{read_upload_form, UploadForm, UNNAMED_FILE};
use crate::services::Registered;
use crate::state::AppState;

/// Assemble the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subir-certificado", post(upload_certificate))
        .route("/guardar-titulo", post(save_title))
}

/// Reply to `POST /subir-certificado`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Identifier assigned by the content store.
    pub content_id: String,
    /// Hex SHA-256 of the uploaded bytes.
    pub content_hash: String,
}

/// Reply to `POST /guardar-titulo`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleResponse {
    pub message: String,
    pub content_id: String,
}

/// Multipart body accepted by the upload endpoints (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadRequest {
    /// The certificate document.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// Owner wallet.
    wallet: String,
    /// Hex SHA-256 the client computed (`/guardar-titulo` only).
    hash: Option<String>,
}

async fn form_bytes(form: &UploadForm) -> Result<(Vec<u8>, String), AppError> {
    match &form.file {
        Some(file) => {
            tracing::debug!(file_name = file.file_name(), size = file.size(), "reading spooled upload");
            Ok((file.read().await?, file.file_name().to_owned()))
        }
        None => Ok((Vec::new(), UNNAMED_FILE.to_owned())),
    }
}

/// Upload a certificate document and register it for a wallet.
#[utoipa::path(
    post,
    path = "/subir-certificado",
    request_body(content = UploadRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Certificate registered", body = UploadResponse),
        (status = 400, description = "File or wallet missing", body = ErrorBody),
        (status = 409, description = "Document already registered", body = ErrorBody),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "uploads"
)]
pub async fn upload_certificate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart, &state.config.upload_dir)
        .await
        .map_err(logged("upload_certificate"))?;
    let (bytes, file_name) = form_bytes(&form).await.map_err(logged("upload_certificate"))?;

    let Registered {
        content_id,
        content_hash,
    } = state
        .uploads
        .submit(bytes, form.field("wallet"), &file_name)
        .await
        .map_err(rejected("upload_certificate"))?;

    Ok(Json(UploadResponse {
        message: "certificate registered".to_string(),
        content_id: content_id.into_inner(),
        content_hash: content_hash.into_inner(),
    }))
}

/// Register a title document after checking it against the client's hash.
#[utoipa::path(
    post,
    path = "/guardar-titulo",
    request_body(content = UploadRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Title registered", body = TitleResponse),
        (status = 400, description = "Missing field or hash mismatch", body = ErrorBody),
        (status = 409, description = "Document already registered", body = ErrorBody),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "uploads"
)]
pub async fn save_title(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TitleResponse>, AppError> {
    let form = read_upload_form(multipart, &state.config.upload_dir)
        .await
        .map_err(logged("save_title"))?;
    let (bytes, file_name) = form_bytes(&form).await.map_err(logged("save_title"))?;

    let registered = state
        .uploads
        .submit_with_claimed_hash(bytes, form.field("wallet"), &file_name, form.field("hash"))
        .await
        .map_err(rejected("save_title"))?;

    Ok(Json(TitleResponse {
        message: "title registered".to_string(),
        content_id: registered.content_id.into_inner(),
    }))
}
