//! # certreg-api: Certificate Registry Gateway
//!
//! HTTP gateway that registers certificate documents: each upload is hashed,
//! checked for duplicates, stored in a content-addressed store, and recorded
//! with its owner wallet. A separate registry maps wallets to roles.
//!
//! ## API Surface
//!
//! | Method | Path                         | Module                    |
//! |--------|------------------------------|---------------------------|
//! | GET    | `/certificados`              | [`routes::certificates`]  |
//! | DELETE | `/eliminar-certificado/{id}` | [`routes::certificates`]  |
//! | POST   | `/subir-certificado`         | [`routes::uploads`]       |
//! | POST   | `/guardar-titulo`            | [`routes::uploads`]       |
//! | POST   | `/guardar-rol`               | [`routes::roles`]         |
//! | DELETE | `/eliminar-rol/{wallet}`     | [`routes::roles`]         |
//! | GET    | `/roles/{wallet}`            | [`routes::roles`]         |
//! | GET    | `/listar-roles`              | [`routes::roles`]         |
//!
//! Operational: `/health/liveness`, `/health/readiness`, `/metrics`,
//! `/openapi.json`.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → DefaultBodyLimit → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod spool;
pub mod state;
pub mod store;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::certificates::router())
        .merge(routes::roles::router())
        .merge(routes::uploads::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(metrics.clone()));
    }

    let mut ops = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        ops = ops
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(axum::Extension(metrics));
    }

    Router::new()
        .merge(ops)
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /metrics: Prometheus text exposition.
async fn prometheus_metrics(
    axum::Extension(metrics): axum::Extension<middleware::metrics::ApiMetrics>,
) -> impl IntoResponse {
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: checks the relational store and the content store.
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.certificates.health_check().await {
        tracing::warn!("Relational store health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
    }

    if let Err(e) = state.content.health_check().await {
        tracing::warn!(backend = state.content.name(), "Content store health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "content store unreachable").into_response();
    }

    (StatusCode::OK, "ready").into_response()
}
