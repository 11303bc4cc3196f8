//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds no registry data of its own. Certificates and role
//! assignments live in the relational store (Postgres, or the in-memory
//! store when `DATABASE_URL` is unset) and document bytes live in the
//! content store. The services below are stateless functions over those
//! two stores.

use std::path::PathBuf;
use std::sync::Arc;

use certreg_content::{ContentStore, MemoryContentStore};
use certreg_core::{CertificateId, ContentHash, WalletAddress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::metrics::ApiMetrics;
use crate::services::{CertificateService, RoleRegistry, UploadWorkflow};
use crate::store::{CertificateStore, MemoryStore, RoleStore};

// -- Record Types -------------------------------------------------------------

/// Provenance record for a registered certificate document.
///
/// Created only by the upload workflow and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: CertificateId,
    /// Wallet that uploaded the document.
    #[schema(value_type = String)]
    pub owner_wallet: WalletAddress,
    /// Original file name, informational only.
    pub file_name: String,
    /// Hex SHA-256 of the document bytes. Unique across records.
    #[schema(value_type = String)]
    pub content_hash: ContentHash,
    /// Identifier returned by the content store.
    pub content_id: String,
    pub created_at: DateTime<Utc>,
}

/// A certificate record before the store has assigned its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCertificate {
    pub owner_wallet: WalletAddress,
    pub file_name: String,
    pub content_hash: ContentHash,
    pub content_id: String,
}

/// A wallet's role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct RoleAssignment {
    pub wallet: String,
    pub role: String,
}

// -- Application State --------------------------------------------------------

/// Default request body ceiling for uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
///
/// Custom `Debug` redacts the `database_url` to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Directory where uploaded files are spooled while a request runs.
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Whether the Prometheus middleware and `/metrics` endpoint are mounted.
    pub metrics_enabled: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            database_url: None,
            upload_dir: std::env::temp_dir(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 4000)
    /// - `DATABASE_URL` (optional)
    /// - `UPLOAD_DIR` (default: the system temp directory)
    /// - `MAX_UPLOAD_BYTES` (default: 10 MiB)
    /// - `CERTREG_METRICS_ENABLED` (default: true; `false` disables)
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|u| !u.trim().is_empty()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            metrics_enabled: std::env::var("CERTREG_METRICS_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub uploads: UploadWorkflow,
    pub roles: RoleRegistry,
    pub certificates: CertificateService,
    pub content: Arc<dyn ContentStore>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Create a fully in-memory state with default config (for testing).
    pub fn new() -> Self {
        Self::in_memory(AppConfig::default(), Arc::new(MemoryContentStore::new()))
    }

    /// Create a state backed by the in-memory relational store.
    pub fn in_memory(config: AppConfig, content: Arc<dyn ContentStore>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_backends(config, store.clone(), store, content)
    }

    /// Create a state over explicit store backends.
    pub fn with_backends(
        config: AppConfig,
        certificates: Arc<dyn CertificateStore>,
        roles: Arc<dyn RoleStore>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        let metrics = ApiMetrics::new();
        Self {
            uploads: UploadWorkflow::new(certificates.clone(), content.clone(), metrics.clone()),
            roles: RoleRegistry::new(roles),
            certificates: CertificateService::new(certificates),
            content,
            metrics,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
