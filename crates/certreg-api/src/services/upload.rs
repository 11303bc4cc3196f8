//! # Upload Workflow
//!
//! Registers a certificate document:
//!
//! 1. Validate the owner wallet and the presence of file bytes.
//! 2. Compute the SHA-256 content hash.
//! 3. Reject with [`RegistryError::DuplicateContent`] if a record already
//!    carries that hash. The content store is not contacted.
//! 4. Hand the bytes to the content store and receive a content id.
//! 5. Insert the provenance record.
//!
//! Step 3 is advisory; the store's uniqueness guarantee in step 5 is what
//! closes the race between concurrent submissions of the same document.
//!
//! A failure after step 4 leaves the content stored with no record pointing
//! at it. Such orphans are logged and left in place.

use std::sync::Arc;

use certreg_content::{ContentId, ContentStore};
use certreg_core::{ContentHash, ValidationError, WalletAddress};

use super::RegistryError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::NewCertificate;
use crate::store::CertificateStore;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub content_id: ContentId,
    pub content_hash: ContentHash,
}

/// Orchestrates the relational store and the content store for uploads.
#[derive(Debug, Clone)]
pub struct UploadWorkflow {
    certificates: Arc<dyn CertificateStore>,
    content: Arc<dyn ContentStore>,
    metrics: ApiMetrics,
}

impl UploadWorkflow {
    pub fn new(
        certificates: Arc<dyn CertificateStore>,
        content: Arc<dyn ContentStore>,
        metrics: ApiMetrics,
    ) -> Self {
        Self {
            certificates,
            content,
            metrics,
        }
    }

    /// Register `bytes` as a certificate owned by `owner_wallet`.
    pub async fn submit(
        &self,
        bytes: Vec<u8>,
        owner_wallet: &str,
        file_name: &str,
    ) -> Result<Registered, RegistryError> {
        let result = self.run(bytes, owner_wallet, file_name, None).await;
        self.metrics.record_upload(outcome(&result));
        result
    }

    /// Register `bytes` after checking them against a caller-supplied hash.
    ///
    /// The digest computed here is authoritative. `claimed_hash` must be
    /// present, well-formed and equal to it (case-insensitive), otherwise
    /// nothing is stored.
    pub async fn submit_with_claimed_hash(
        &self,
        bytes: Vec<u8>,
        owner_wallet: &str,
        file_name: &str,
        claimed_hash: &str,
    ) -> Result<Registered, RegistryError> {
        let result = if claimed_hash.trim().is_empty() {
            Err(ValidationError::MissingField("hash").into())
        } else {
            match ContentHash::parse(claimed_hash) {
                Ok(claimed) => self.run(bytes, owner_wallet, file_name, Some(claimed)).await,
                Err(e) => Err(e.into()),
            }
        };
        self.metrics.record_upload(outcome(&result));
        result
    }

    async fn run(
        &self,
        bytes: Vec<u8>,
        owner_wallet: &str,
        file_name: &str,
        claimed: Option<ContentHash>,
    ) -> Result<Registered, RegistryError> {
        let owner_wallet = WalletAddress::new(owner_wallet)?;
        if bytes.is_empty() {
            return Err(ValidationError::MissingField("file").into());
        }

        let content_hash = ContentHash::of(&bytes);
        if let Some(claimed) = claimed {
            if claimed != content_hash {
                return Err(RegistryError::HashMismatch {
                    claimed,
                    computed: content_hash,
                });
            }
        }

        if self.certificates.find_by_hash(&content_hash).await?.is_some() {
            return Err(RegistryError::DuplicateContent(content_hash));
        }

        let size = bytes.len();
        let content_id = self.content.store(bytes).await?;
        tracing::info!(
            backend = self.content.name(),
            content_hash = %content_hash,
            content_id = %content_id,
            size,
            "document stored"
        );

        let new = NewCertificate {
            owner_wallet: owner_wallet.clone(),
            file_name: file_name.to_string(),
            content_hash: content_hash.clone(),
            content_id: content_id.to_string(),
        };
        let record = match self.certificates.insert(new).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    content_hash = %content_hash,
                    content_id = %content_id,
                    "certificate record not created; stored content is orphaned"
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            id = %record.id,
            wallet = %owner_wallet,
            content_hash = %content_hash,
            "certificate registered"
        );

        Ok(Registered {
            content_id,
            content_hash,
        })
    }
}

fn outcome(result: &Result<Registered, RegistryError>) -> &'static str {
    match result {
        Ok(_) => "registered",
        Err(RegistryError::DuplicateContent(_)) => "duplicate",
        Err(RegistryError::Validation(_)) | Err(RegistryError::HashMismatch { .. }) => "rejected",
        Err(_) => "failed",
    }
}
