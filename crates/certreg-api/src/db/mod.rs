//! # Database Persistence Layer
//!
//! Postgres persistence for the registry via SQLx.
//!
//! ## Architecture
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, the API
//! persists certificate records and role assignments to PostgreSQL. When
//! absent, the API falls back to [`crate::store::MemoryStore`] (suitable for
//! development and testing).
//!
//! All statements are parameterized; no value is ever interpolated into SQL.

pub mod certificates;
pub mod roles;

use async_trait::async_trait;
use certreg_core::{CertificateId, ContentHash, RoleName, WalletAddress};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::state::{CertificateRecord, NewCertificate, RoleAssignment};
use crate::store::{CertificateStore, RoleStore, StoreError};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no URL is configured (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!(
                "DATABASE_URL not set, running in-memory only mode. \
                 Certificates and roles will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// PostgreSQL-backed store implementing both table traits.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map an insert failure, turning a unique violation into [`StoreError::DuplicateHash`].
fn map_insert_error(err: sqlx::Error, hash: &ContentHash) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateHash(hash.clone())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl CertificateStore for PgStore {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<CertificateRecord>, StoreError> {
        certificates::find_by_hash(&self.pool, hash).await
    }

    async fn insert(&self, certificate: NewCertificate) -> Result<CertificateRecord, StoreError> {
        let hash = certificate.content_hash.clone();
        match certificates::insert(&self.pool, &certificate).await {
            Ok(row) => row.try_into_record(),
            Err(e) => Err(map_insert_error(e, &hash)),
        }
    }

    async fn list(&self) -> Result<Vec<CertificateRecord>, StoreError> {
        certificates::list_all(&self.pool).await
    }

    async fn delete(&self, id: CertificateId) -> Result<bool, StoreError> {
        Ok(certificates::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn upsert(&self, wallet: &WalletAddress, role: &RoleName) -> Result<(), StoreError> {
        Ok(roles::upsert(&self.pool, wallet, role).await?)
    }

    async fn get(&self, wallet: &WalletAddress) -> Result<Option<RoleName>, StoreError> {
        roles::get(&self.pool, wallet).await
    }

    async fn delete(&self, wallet: &WalletAddress) -> Result<bool, StoreError> {
        Ok(roles::delete(&self.pool, wallet).await?)
    }

    async fn list(&self) -> Result<Vec<RoleAssignment>, StoreError> {
        Ok(roles::list_all(&self.pool).await?)
    }
}
