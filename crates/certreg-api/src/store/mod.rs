//! # Relational Store Abstraction
//!
//! Trait-based access to the two registry tables so the services can run
//! against PostgreSQL ([`crate::db::PgStore`]) in production and against
//! [`MemoryStore`] in tests and local development.
//!
//! Both backends enforce `content_hash` uniqueness at insert time and report
//! a collision as [`StoreError::DuplicateHash`], so the advisory existence
//! check in the upload workflow is backed by an atomic guarantee.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use certreg_core::{CertificateId, ContentHash, RoleName, WalletAddress};

use crate::state::{CertificateRecord, NewCertificate, RoleAssignment};

/// Error type for relational store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert collided with an existing record's content hash.
    #[error("content hash already registered: {0}")]
    DuplicateHash(ContentHash),

    /// The database rejected or failed the statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a domain record.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

/// Access to the `certificates` table.
#[async_trait]
pub trait CertificateStore: Send + Sync + std::fmt::Debug {
    /// Fetch the record registered under `hash`, if any.
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<CertificateRecord>, StoreError>;

    /// Insert a record, assigning its id and creation time.
    ///
    /// Fails with [`StoreError::DuplicateHash`] when the hash is taken.
    async fn insert(&self, certificate: NewCertificate) -> Result<CertificateRecord, StoreError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<CertificateRecord>, StoreError>;

    /// Delete a record. Returns `false` when no record had that id.
    async fn delete(&self, id: CertificateId) -> Result<bool, StoreError>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Access to the `wallet_roles` table.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug {
    /// Insert or overwrite the role for `wallet`.
    async fn upsert(&self, wallet: &WalletAddress, role: &RoleName) -> Result<(), StoreError>;

    /// Fetch the role for `wallet`, if assigned.
    async fn get(&self, wallet: &WalletAddress) -> Result<Option<RoleName>, StoreError>;

    /// Remove the assignment. Returns `false` when none existed.
    async fn delete(&self, wallet: &WalletAddress) -> Result<bool, StoreError>;

    /// Every assignment, in no particular order.
    async fn list(&self) -> Result<Vec<RoleAssignment>, StoreError>;
}
