//! # certreg-content: Content Store Client
//!
//! Typed access to the content-addressed store that holds certificate
//! documents. The registry only ever needs one operation from the store:
//! hand over bytes, get back a content identifier.
//!
//! ## Backends
//!
//! - [`IpfsClient`]: IPFS HTTP API (`POST /api/v0/add`), which the IPFS
//!   Cluster proxy endpoint also serves.
//! - [`MemoryContentStore`]: in-process map, for tests and local development.
//!
//! ## Call Policy
//!
//! Every call is a single attempt. There is no retry, backoff, or
//! compensation; a failed `store` surfaces as [`ContentStoreError`] and the
//! caller decides what to do.

pub mod config;
pub mod error;
pub mod ipfs;
pub mod memory;
pub mod types;

pub use config::{ContentBackend, ContentStoreConfig};
pub use error::ContentStoreError;
pub use ipfs::IpfsClient;
pub use memory::MemoryContentStore;
pub use types::ContentId;

use std::sync::Arc;

use async_trait::async_trait;

/// A content-addressed blob store.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Store `bytes` and return the identifier the store assigned to them.
    async fn store(&self, bytes: Vec<u8>) -> Result<ContentId, ContentStoreError>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> Result<(), ContentStoreError>;
}

/// Build the content store selected by `config`.
pub fn connect(config: ContentStoreConfig) -> Result<Arc<dyn ContentStore>, ContentStoreError> {
    match config.backend {
        ContentBackend::Memory => {
            tracing::warn!("content store backend is in-memory; stored documents will not survive restarts");
            Ok(Arc::new(MemoryContentStore::new()))
        }
        ContentBackend::Ipfs(ref endpoint) => {
            tracing::info!(endpoint = %endpoint, "content store backend is IPFS");
            Ok(Arc::new(IpfsClient::new(&config)?))
        }
    }
}
