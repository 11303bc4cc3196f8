//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the registry's identifiers. Each one is a
//! distinct type: a [`RoleName`] cannot be passed where a [`WalletAddress`]
//! is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`WalletAddress`], [`RoleName`]) reject empty or
//! whitespace-only input at construction time and otherwise keep the value
//! exactly as given. Neither imposes a format or a length limit: wallets are
//! opaque identity strings and roles are free-form labels.
//! [`CertificateId`] is assigned by the relational store.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn non_empty(field: &'static str, s: impl Into<String>) -> Result<String, ValidationError> {
    let s = s.into();
    if s.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(s)
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// Identity string of a wallet that owns certificates or holds a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Create a validated wallet address.
    ///
    /// The value is kept verbatim, so `"0xAB "` and `"0xAB"` are distinct.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty("wallet", s).map(Self)
    }

    /// Return the wallet as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wallet and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form role label assigned to a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Create a validated role name.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty("role", s).map(Self)
    }

    /// Return the role as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the role and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for RoleName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// Store-assigned identifiers
// ---------------------------------------------------------------------------

/// Identifier of a certificate record, assigned by the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(i64);

impl CertificateId {
    /// Wrap a raw store identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an identifier from a path segment.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidCertificateId(s.to_string()))
    }

    /// Access the raw identifier.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_is_kept_verbatim() {
        let w = WalletAddress::new("  0xAB  ").unwrap();
        assert_eq!(w.as_str(), "  0xAB  ");
        assert_ne!(w, WalletAddress::new("0xAB").unwrap());
    }

    #[test]
    fn wallet_rejects_empty() {
        assert_eq!(
            WalletAddress::new(""),
            Err(ValidationError::MissingField("wallet"))
        );
        assert_eq!(
            WalletAddress::new("   \t"),
            Err(ValidationError::MissingField("wallet"))
        );
    }

    #[test]
    fn long_identifiers_are_accepted() {
        let long = "a".repeat(4096);
        assert_eq!(WalletAddress::new(long.clone()).unwrap().as_str(), long);
        assert_eq!(RoleName::new(long.clone()).unwrap().as_str(), long);
    }

    #[test]
    fn wallet_preserves_case() {
        let w = WalletAddress::new("0xAbCd").unwrap();
        assert_eq!(w.to_string(), "0xAbCd");
    }

    #[test]
    fn role_rejects_empty() {
        assert_eq!(RoleName::new(" "), Err(ValidationError::MissingField("role")));
    }

    #[test]
    fn role_is_free_form() {
        let r = RoleName::new("registrar de títulos").unwrap();
        assert_eq!(r, "registrar de títulos");
    }

    #[test]
    fn certificate_id_parses_positive_integers() {
        assert_eq!(CertificateId::parse("42").unwrap().get(), 42);
    }

    #[test]
    fn certificate_id_rejects_garbage() {
        assert!(CertificateId::parse("abc").is_err());
        assert!(CertificateId::parse("0").is_err());
        assert!(CertificateId::parse("-3").is_err());
    }

    #[test]
    fn missing_field_message_names_field() {
        let err = WalletAddress::new("").unwrap_err();
        assert_eq!(err.to_string(), "wallet is required");
    }
}
