//! Certificate listing and administrative deletion.

use std::sync::Arc;

use certreg_core::CertificateId;

use super::RegistryError;
use crate::state::CertificateRecord;
use crate::store::{CertificateStore, StoreError};

#[derive(Debug, Clone)]
pub struct CertificateService {
    store: Arc<dyn CertificateStore>,
}

impl CertificateService {
    pub fn new(store: Arc<dyn CertificateStore>) -> Self {
        Self { store }
    }

    /// All records, newest first.
    pub async fn list_certificates(&self) -> Result<Vec<CertificateRecord>, RegistryError> {
        Ok(self.store.list().await?)
    }

    /// Delete the record with `id`. The stored document is left in place.
    pub async fn delete_certificate(&self, id: CertificateId) -> Result<(), RegistryError> {
        if !self.store.delete(id).await? {
            return Err(RegistryError::NotFound(format!("certificate {id} not found")));
        }
        tracing::info!(id = %id, "certificate deleted");
        Ok(())
    }

    /// Readiness check against the relational store.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }
}
