//! Wallet role persistence operations on the `wallet_roles` table.

use certreg_core::{RoleName, WalletAddress};
use sqlx::PgPool;

use crate::state::RoleAssignment;
use crate::store::StoreError;

/// Insert or overwrite the role for `wallet`.
pub async fn upsert(pool: &PgPool, wallet: &WalletAddress, role: &RoleName) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO wallet_roles (wallet, role) VALUES ($1, $2)
         ON CONFLICT (wallet) DO UPDATE SET role = EXCLUDED.role, updated_at = now()",
    )
    .bind(wallet.as_str())
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the role for `wallet`.
pub async fn get(pool: &PgPool, wallet: &WalletAddress) -> Result<Option<RoleName>, StoreError> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM wallet_roles WHERE wallet = $1")
        .bind(wallet.as_str())
        .fetch_optional(pool)
        .await?;

    role.map(|r| {
        RoleName::new(r).map_err(|e| {
            tracing::error!(wallet = %wallet, error = %e, "wallet_roles row has invalid role");
            StoreError::CorruptRow(format!("role for {wallet}: {e}"))
        })
    })
    .transpose()
}

/// Delete the assignment for `wallet`. Returns `true` if a row was removed.
pub async fn delete(pool: &PgPool, wallet: &WalletAddress) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM wallet_roles WHERE wallet = $1")
        .bind(wallet.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load every assignment.
pub async fn list_all(pool: &PgPool) -> Result<Vec<RoleAssignment>, sqlx::Error> {
    sqlx::query_as::<_, RoleAssignment>("SELECT wallet, role FROM wallet_roles ORDER BY wallet")
        .fetch_all(pool)
        .await
}
