//! In-memory relational store.
//!
//! Used when `DATABASE_URL` is unset and by the test suite. State does not
//! survive restarts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use certreg_core::{CertificateId, ContentHash, RoleName, WalletAddress};
use chrono::Utc;
use parking_lot::RwLock;

use super::{CertificateStore, RoleStore, StoreError};
use crate::state::{CertificateRecord, NewCertificate, RoleAssignment};

#[derive(Debug, Default)]
struct Tables {
    certificates: Vec<CertificateRecord>,
    next_certificate_id: i64,
    roles: HashMap<WalletAddress, RoleName>,
}

/// Thread-safe, cloneable in-memory store implementing both table traits.
///
/// All operations are synchronous under the hood (the RwLock is
/// `parking_lot`, not `tokio::sync`) because the lock is never held across
/// an `.await` point. `parking_lot::RwLock` is non-poisonable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificateStore for MemoryStore {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .certificates
            .iter()
            .find(|c| &c.content_hash == hash)
            .cloned())
    }

    async fn insert(&self, certificate: NewCertificate) -> Result<CertificateRecord, StoreError> {
        let mut tables = self.tables.write();

        // Re-checked under the write lock, mirroring the table's UNIQUE constraint.
        if tables
            .certificates
            .iter()
            .any(|c| c.content_hash == certificate.content_hash)
        {
            return Err(StoreError::DuplicateHash(certificate.content_hash));
        }

        tables.next_certificate_id += 1;
        let record = CertificateRecord {
            id: CertificateId::new(tables.next_certificate_id),
            owner_wallet: certificate.owner_wallet,
            file_name: certificate.file_name,
            content_hash: certificate.content_hash,
            content_id: certificate.content_id,
            created_at: Utc::now(),
        };
        tables.certificates.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<CertificateRecord>, StoreError> {
        let mut records = self.tables.read().certificates.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn delete(&self, id: CertificateId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        let before = tables.certificates.len();
        tables.certificates.retain(|c| c.id != id);
        Ok(tables.certificates.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn upsert(&self, wallet: &WalletAddress, role: &RoleName) -> Result<(), StoreError> {
        self.tables.write().roles.insert(wallet.clone(), role.clone());
        Ok(())
    }

    async fn get(&self, wallet: &WalletAddress) -> Result<Option<RoleName>, StoreError> {
        Ok(self.tables.read().roles.get(wallet).cloned())
    }

    async fn delete(&self, wallet: &WalletAddress) -> Result<bool, StoreError> {
        Ok(self.tables.write().roles.remove(wallet).is_some())
    }

    async fn list(&self) -> Result<Vec<RoleAssignment>, StoreError> {
        Ok(self
            .tables
            .read()
            .roles
            .iter()
            .map(|(wallet, role)| RoleAssignment {
                wallet: wallet.to_string(),
                role: role.to_string(),
            })
            .collect())
    }
}
