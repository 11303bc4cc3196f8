//! # Registry Services
//!
//! The operations behind the HTTP surface, written against the store traits
//! so they run unchanged over Postgres or the in-memory backends.
//!
//! - [`UploadWorkflow`]: hash, dedupe, store content, record provenance.
//! - [`RoleRegistry`]: wallet to role assignments.
//! - [`CertificateService`]: listing and administrative deletion.

pub mod certificates;
pub mod roles;
pub mod upload;

pub use certificates::CertificateService;
pub use roles::RoleRegistry;
pub use upload::{Registered, UploadWorkflow};

use certreg_content::ContentStoreError;
use certreg_core::{ContentHash, ValidationError};
use thiserror::Error;

use crate::store::StoreError;

/// Failure taxonomy shared by every registry operation.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Caller input was missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The hash submitted alongside a document does not match its bytes.
    #[error("integrity mismatch: claimed hash {claimed} does not match computed hash {computed}")]
    HashMismatch {
        claimed: ContentHash,
        computed: ContentHash,
    },

    /// A record with this content hash already exists.
    #[error("certificate already registered (content hash {0})")]
    DuplicateContent(ContentHash),

    /// The addressed certificate or role does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The relational store failed.
    #[error("store failure: {0}")]
    Store(StoreError),

    /// The content store failed.
    #[error("content store failure: {0}")]
    Content(#[from] ContentStoreError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateHash(hash) => Self::DuplicateContent(hash),
            other => Self::Store(other),
        }
    }
}

impl RegistryError {
    /// Whether the failure was caused by the caller rather than a backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_) | Self::Content(_))
    }

    /// Log the failure against `operation`: `warn` for client errors,
    /// `error` for storage failures.
    pub fn log(&self, operation: &'static str) {
        if self.is_client_error() {
            tracing::warn!(operation, error = %self, "request rejected");
        } else {
            tracing::error!(operation, error = %self, "storage failure");
        }
    }
}
