//! Content store client configuration.
//!
//! Selects the backend and its endpoint. Defaults point at a local IPFS
//! daemon; override via environment variables or explicit construction for
//! clusters and tests.

use url::Url;

/// Default IPFS HTTP API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001";

/// Which content store implementation to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBackend {
    /// IPFS HTTP API (or IPFS Cluster proxy) rooted at this URL.
    Ipfs(Url),
    /// In-process store. Contents are lost on restart.
    Memory,
}

/// Configuration for connecting to the content store.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ContentStoreConfig {
    /// Selected backend.
    pub backend: ContentBackend,
    /// Optional bearer token sent on every request (cluster deployments
    /// behind an authenticating proxy).
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ContentStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStoreConfig")
            .field("backend", &self.backend)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ContentStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CONTENT_STORE_URL` (default: `http://127.0.0.1:5001`; the literal
    ///   `memory` selects the in-process store)
    /// - `CONTENT_STORE_TOKEN` (optional)
    /// - `CONTENT_STORE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("CONTENT_STORE_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Ok(Self {
            backend: parse_backend(&raw)?,
            api_token: std::env::var("CONTENT_STORE_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs: std::env::var("CONTENT_STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration for an IPFS endpoint with no token (for testing).
    pub fn ipfs(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend: parse_backend(endpoint)?,
            api_token: None,
            timeout_secs: 5,
        })
    }

    /// Configuration for the in-process store.
    pub fn memory() -> Self {
        Self {
            backend: ContentBackend::Memory,
            api_token: None,
            timeout_secs: 5,
        }
    }
}

fn parse_backend(raw: &str) -> Result<ContentBackend, ConfigError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("memory") {
        return Ok(ContentBackend::Memory);
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(ContentBackend::Ipfs(url)),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid CONTENT_STORE_URL {0}: {1}")]
    InvalidUrl(String, String),
    #[error("unsupported content store scheme \"{0}\" (expected http, https, or memory)")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_keyword_selects_memory_backend() {
        assert_eq!(parse_backend("memory").unwrap(), ContentBackend::Memory);
        assert_eq!(parse_backend(" MEMORY ").unwrap(), ContentBackend::Memory);
    }

    #[test]
    fn http_url_selects_ipfs_backend() {
        match parse_backend("http://192.168.1.16:9095").unwrap() {
            ContentBackend::Ipfs(url) => assert_eq!(url.as_str(), "http://192.168.1.16:9095/"),
            other => panic!("expected Ipfs, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(matches!(
            parse_backend("not a url"),
            Err(ConfigError::InvalidUrl(..))
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(matches!(
            parse_backend("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let mut cfg = ContentStoreConfig::ipfs("http://127.0.0.1:5001").unwrap();
        cfg.api_token = Some("super-secret".into());
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn from_env_reads_overrides() {
        std::env::set_var("CONTENT_STORE_URL", "memory");
        std::env::set_var("CONTENT_STORE_TIMEOUT_SECS", "7");
        let cfg = ContentStoreConfig::from_env().unwrap();
        std::env::remove_var("CONTENT_STORE_URL");
        std::env::remove_var("CONTENT_STORE_TIMEOUT_SECS");
        assert_eq!(cfg.backend, ContentBackend::Memory);
        assert_eq!(cfg.timeout_secs, 7);
    }
}
