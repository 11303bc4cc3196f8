//! # Certificate Records
//!
//! Routes:
//! - GET    /certificados: all records, newest first
//! - DELETE /eliminar-certificado/{id}: delete a record by id

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use certreg_core::CertificateId;

use super::{logged, rejected, MessageResponse};
use crate::error::{AppError, ErrorBody};
use crate::state::{AppState, CertificateRecord};

/// Assemble the certificate record router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/certificados", get(list_certificates))
        .route("/eliminar-certificado/{id}", delete(delete_certificate))
}

/// List every registered certificate.
#[utoipa::path(
    get,
    path = "/certificados",
    responses(
        (status = 200, description = "Certificate records, newest first", body = Vec<CertificateRecord>),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "certificates"
)]
pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CertificateRecord>>, AppError> {
    let records = state
        .certificates
        .list_certificates()
        .await
        .map_err(rejected("list_certificates"))?;
    Ok(Json(records))
}

/// Delete a certificate record. The stored document is not removed.
#[utoipa::path(
    delete,
    path = "/eliminar-certificado/{id}",
    params(("id" = i64, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 400, description = "Id is not a positive integer", body = ErrorBody),
        (status = 404, description = "No record with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "certificates"
)]
pub async fn delete_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = CertificateId::parse(&id).map_err(logged("delete_certificate"))?;
    state
        .certificates
        .delete_certificate(id)
        .await
        .map_err(rejected("delete_certificate"))?;
    Ok(Json(MessageResponse::new(format!("certificate {id} deleted"))))
}
