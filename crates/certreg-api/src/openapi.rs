//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "certreg API",
        description = "Certificate registry gateway: deduplicated document uploads to a content-addressed store, provenance records, and wallet roles."
    ),
    paths(
        crate::routes::certificates::list_certificates,
        crate::routes::certificates::delete_certificate,
        crate::routes::roles::save_role,
        crate::routes::roles::delete_role,
        crate::routes::roles::get_role,
        crate::routes::roles::list_roles,
        crate::routes::uploads::upload_certificate,
        crate::routes::uploads::save_title,
    ),
    components(schemas(
        crate::state::CertificateRecord,
        crate::error::ErrorBody,
        crate::routes::MessageResponse,
        crate::routes::roles::SaveRoleRequest,
        crate::routes::roles::RoleResponse,
        crate::routes::uploads::UploadRequest,
        crate::routes::uploads::UploadResponse,
        crate::routes::uploads::TitleResponse,
    )),
    tags(
        (name = "certificates", description = "Certificate provenance records"),
        (name = "roles", description = "Wallet role registry"),
        (name = "uploads", description = "Document registration"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/certificados",
            "/eliminar-certificado/{id}",
            "/guardar-rol",
            "/eliminar-rol/{wallet}",
            "/roles/{wallet}",
            "/listar-roles",
            "/subir-certificado",
            "/guardar-titulo",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
