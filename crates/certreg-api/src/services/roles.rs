//! Wallet role registry. Every call goes straight to the store.

use std::collections::BTreeMap;
use std::sync::Arc;

use certreg_core::{RoleName, WalletAddress};

use super::RegistryError;
use crate::store::RoleStore;

#[derive(Debug, Clone)]
pub struct RoleRegistry {
    store: Arc<dyn RoleStore>,
}

impl RoleRegistry {
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self { store }
    }

    /// Assign `role` to `wallet`, replacing any previous assignment.
    pub async fn upsert_role(&self, wallet: &str, role: &str) -> Result<(), RegistryError> {
        let wallet = WalletAddress::new(wallet)?;
        let role = RoleName::new(role)?;
        self.store.upsert(&wallet, &role).await?;
        tracing::info!(wallet = %wallet, role = %role, "role assigned");
        Ok(())
    }

    /// Remove the assignment for `wallet`.
    pub async fn delete_role(&self, wallet: &str) -> Result<(), RegistryError> {
        let wallet = lookup_key(wallet)?;
        if !self.store.delete(&wallet).await? {
            return Err(not_assigned(wallet.as_str()));
        }
        tracing::info!(wallet = %wallet, "role removed");
        Ok(())
    }

    /// Fetch the role assigned to `wallet`.
    pub async fn get_role(&self, wallet: &str) -> Result<RoleName, RegistryError> {
        let wallet = lookup_key(wallet)?;
        self.store
            .get(&wallet)
            .await?
            .ok_or_else(|| not_assigned(wallet.as_str()))
    }

    /// Snapshot of every assignment, keyed by wallet.
    pub async fn list_roles(&self) -> Result<BTreeMap<String, String>, RegistryError> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .map(|a| (a.wallet, a.role))
            .collect())
    }
}

fn not_assigned(wallet: &str) -> RegistryError {
    RegistryError::NotFound(format!("no role assigned to wallet {wallet}"))
}

/// A blank wallet can never hold a role, so lookups report it as unassigned.
fn lookup_key(wallet: &str) -> Result<WalletAddress, RegistryError> {
    WalletAddress::new(wallet).map_err(|_| not_assigned(wallet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn registry() -> RoleRegistry {
        RoleRegistry::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn upsert_then_get() {
        let reg = registry();
        reg.upsert_role("0xCD", "admin").await.unwrap();
        assert_eq!(reg.get_role("0xCD").await.unwrap(), "admin");
        reg.upsert_role("0xCD", "viewer").await.unwrap();
        assert_eq!(reg.get_role("0xCD").await.unwrap(), "viewer");
        assert_eq!(reg.list_roles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_inputs_are_rejected() {
        let reg = registry();
        assert!(matches!(reg.upsert_role("", "admin").await, Err(RegistryError::Validation(_))));
        assert!(matches!(reg.upsert_role("0xCD", " ").await, Err(RegistryError::Validation(_))));
        assert!(reg.list_roles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_assignment_is_not_found() {
        let reg = registry();
        assert!(matches!(reg.get_role("0xZZ").await, Err(RegistryError::NotFound(_))));
        assert!(matches!(reg.delete_role("0xZZ").await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn blank_lookups_are_not_found() {
        let reg = registry();
        assert!(matches!(reg.get_role(" ").await, Err(RegistryError::NotFound(_))));
        assert!(matches!(reg.delete_role("").await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn wallets_and_roles_have_no_length_limit() {
        let reg = registry();
        let wallet = "a".repeat(300);
        let role = "r".repeat(300);
        assert!(matches!(reg.get_role(&wallet).await, Err(RegistryError::NotFound(_))));
        reg.upsert_role(&wallet, &role).await.unwrap();
        assert_eq!(reg.get_role(&wallet).await.unwrap().as_str(), role);
    }

    #[tokio::test]
    async fn wallets_are_matched_verbatim() {
        let reg = registry();
        reg.upsert_role("0xAB ", "admin").await.unwrap();
        assert!(matches!(reg.get_role("0xAB").await, Err(RegistryError::NotFound(_))));
        assert_eq!(reg.get_role("0xAB ").await.unwrap(), "admin");
    }

    #[tokio::test]
    async fn delete_removes_assignment() {
        let reg = registry();
        reg.upsert_role("0xCD", "admin").await.unwrap();
        reg.delete_role("0xCD").await.unwrap();
        assert!(matches!(reg.get_role("0xCD").await, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_is_keyed_by_wallet() {
        let reg = registry();
        reg.upsert_role("0xB", "viewer").await.unwrap();
        reg.upsert_role("0xA", "admin").await.unwrap();
        let roles = reg.list_roles().await.unwrap();
        assert_eq!(
            roles.into_iter().collect::<Vec<_>>(),
            vec![
                ("0xA".to_string(), "admin".to_string()),
                ("0xB".to_string(), "viewer".to_string())
            ]
        );
    }
}
