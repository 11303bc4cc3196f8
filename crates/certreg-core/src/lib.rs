#![deny(missing_docs)]

//! # certreg-core: Foundational Types for the Certificate Registry
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies: only `serde`, `thiserror`,
//! and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`WalletAddress`] cannot be
//!    passed where a [`RoleName`] is expected, and neither can be empty.
//!
//! 2. **[`ContentHash::of`] is the sole path to digest computation.** Every
//!    certificate hash stored by the registry is the lowercase hex SHA-256 of
//!    the uploaded bytes, computed server-side.
//!
//! 3. **[`ValidationError`] for rejected input.** Structured errors with
//!    `thiserror`, no `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;

pub use digest::ContentHash;
pub use error::ValidationError;
pub use identity::{CertificateId, RoleName, WalletAddress};
