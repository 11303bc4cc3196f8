//! # Wallet Roles
//!
//! Routes:
//! - POST   /guardar-rol: assign a role to a wallet (upsert)
//! - DELETE /eliminar-rol/{wallet}: remove a wallet's role
//! - GET    /roles/{wallet}: look up a wallet's role
//! - GET    /listar-roles: every assignment as `{wallet: role}`

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{logged, rejected, MessageResponse};
use crate::error::{AppError, ErrorBody};
use crate::extractors::extract_json;
use crate::state::AppState;

/// Assemble the role router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/guardar-rol", post(save_role))
        .route("/eliminar-rol/{wallet}", delete(delete_role))
        .route("/roles/{wallet}", get(get_role))
        .route("/listar-roles", get(list_roles))
}

/// Body of `POST /guardar-rol`. Missing fields are reported by validation.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SaveRoleRequest {
    pub wallet: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub role: String,
}

/// Assign a role to a wallet, overwriting any previous role.
#[utoipa::path(
    post,
    path = "/guardar-rol",
    request_body = SaveRoleRequest,
    responses(
        (status = 200, description = "Role saved", body = MessageResponse),
        (status = 400, description = "Wallet or role missing", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "roles"
)]
pub async fn save_role(
    State(state): State<AppState>,
    body: Result<Json<SaveRoleRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let req = extract_json(body).map_err(logged("save_role"))?;
    state
        .roles
        .upsert_role(&req.wallet, &req.role)
        .await
        .map_err(rejected("save_role"))?;
    Ok(Json(MessageResponse::new("role saved")))
}

/// Remove a wallet's role.
#[utoipa::path(
    delete,
    path = "/eliminar-rol/{wallet}",
    params(("wallet" = String, Path, description = "Wallet identity")),
    responses(
        (status = 200, description = "Role removed", body = MessageResponse),
        (status = 404, description = "Wallet has no role", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "roles"
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .roles
        .delete_role(&wallet)
        .await
        .map_err(rejected("delete_role"))?;
    Ok(Json(MessageResponse::new("role removed")))
}

/// Look up a wallet's role.
#[utoipa::path(
    get,
    path = "/roles/{wallet}",
    params(("wallet" = String, Path, description = "Wallet identity")),
    responses(
        (status = 200, description = "Assigned role", body = RoleResponse),
        (status = 404, description = "Wallet has no role", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "roles"
)]
pub async fn get_role(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = state
        .roles
        .get_role(&wallet)
        .await
        .map_err(rejected("get_role"))?;
    Ok(Json(RoleResponse {
        role: role.into_inner(),
    }))
}

/// Every role assignment, keyed by wallet.
#[utoipa::path(
    get,
    path = "/listar-roles",
    responses(
        (status = 200, description = "Wallet to role mapping", body = BTreeMap<String, String>),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "roles"
)]
pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let roles = state.roles.list_roles().await.map_err(rejected("list_roles"))?;
    Ok(Json(roles))
}
