//! # Content Hashes
//!
//! Defines [`ContentHash`], the hex-encoded SHA-256 digest that identifies a
//! certificate document inside the registry. The hash is a deterministic,
//! pure function of the file bytes and is distinct from the identifier the
//! content store hands back for the same bytes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Length of a hex-encoded SHA-256 digest.
pub const HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest of a certificate's bytes.
///
/// Construct with [`ContentHash::of`] for bytes the server holds, or with
/// [`ContentHash::parse`] for a digest received from a caller or read back
/// from storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Compute the SHA-256 digest of `bytes`.
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Parse a hex digest, normalising to lowercase.
    ///
    /// Surrounding whitespace is ignored. Anything other than 64 hex
    /// characters is rejected.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.len() != HEX_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidContentHash(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Return the digest as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the hash and return the inner hex string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
