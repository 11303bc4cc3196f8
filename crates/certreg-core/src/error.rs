//! # Validation Errors
//!
//! Errors raised when constructing domain newtypes from untrusted input.
//! Each variant names the field that was rejected so the HTTP layer can hand
//! the message straight back to the caller.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or contained only whitespace.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A content hash was not 64 hex characters.
    #[error("invalid content hash: \"{0}\" (expected 64 hex characters)")]
    InvalidContentHash(String),

    /// A certificate identifier was not a positive integer.
    #[error("invalid certificate id: \"{0}\"")]
    InvalidCertificateId(String),
}
