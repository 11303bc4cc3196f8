//! Certificate persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `certificates` table.
//! Hash uniqueness is enforced by the table's `UNIQUE (content_hash)`
//! constraint; callers map the violation to a conflict.

use certreg_core::{CertificateId, ContentHash, WalletAddress};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::state::{CertificateRecord, NewCertificate};
use crate::store::StoreError;

const SELECT_COLUMNS: &str =
    "SELECT id, owner_wallet, file_name, content_hash, content_id, created_at FROM certificates";

/// Fetch the record registered under `hash`.
pub async fn find_by_hash(
    pool: &PgPool,
    hash: &ContentHash,
) -> Result<Option<CertificateRecord>, StoreError> {
    let row = sqlx::query_as::<_, CertificateRow>(&format!(
        "{SELECT_COLUMNS} WHERE content_hash = $1"
    ))
    .bind(hash.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(CertificateRow::try_into_record).transpose()
}

/// Insert a new record, returning the stored row.
///
/// `id` and `created_at` are assigned by the database.
pub async fn insert(pool: &PgPool, certificate: &NewCertificate) -> Result<CertificateRow, sqlx::Error> {
    sqlx::query_as::<_, CertificateRow>(
        "INSERT INTO certificates (owner_wallet, file_name, content_hash, content_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, owner_wallet, file_name, content_hash, content_id, created_at",
    )
    .bind(certificate.owner_wallet.as_str())
    .bind(&certificate.file_name)
    .bind(certificate.content_hash.as_str())
    .bind(&certificate.content_id)
    .fetch_one(pool)
    .await
}

/// List every record, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<CertificateRecord>, StoreError> {
    let rows = sqlx::query_as::<_, CertificateRow>(&format!(
        "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(CertificateRow::try_into_record).collect()
}

/// Delete a record by id. Returns `true` if a row was removed.
pub async fn delete(pool: &PgPool, id: CertificateId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
        .bind(id.get())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Row type for SQLx mapping.
#[derive(Debug, sqlx::FromRow)]
pub struct CertificateRow {
    id: i64,
    owner_wallet: String,
    file_name: String,
    content_hash: String,
    content_id: String,
    created_at: DateTime<Utc>,
}

impl CertificateRow {
    /// Revalidate the row into a domain record.
    ///
    /// Rows are only ever written through validated newtypes, so a failure
    /// here means the table was modified out of band.
    pub fn try_into_record(self) -> Result<CertificateRecord, StoreError> {
        let owner_wallet = WalletAddress::new(self.owner_wallet).map_err(|e| {
            tracing::error!(id = self.id, error = %e, "certificate row has invalid owner_wallet");
            StoreError::CorruptRow(format!("certificate {}: {e}", self.id))
        })?;
        let content_hash = ContentHash::parse(&self.content_hash).map_err(|e| {
            tracing::error!(id = self.id, error = %e, "certificate row has invalid content_hash");
            StoreError::CorruptRow(format!("certificate {}: {e}", self.id))
        })?;

        Ok(CertificateRecord {
            id: CertificateId::new(self.id),
            owner_wallet,
            file_name: self.file_name,
            content_hash,
            content_id: self.content_id,
            created_at: self.created_at,
        })
    }
}
