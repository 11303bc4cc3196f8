//! Typed client for the IPFS HTTP API.
//!
//! Works against a Kubo daemon (`:5001`) or the IPFS Cluster proxy endpoint
//! (`:9095`), which serves the same `/api/v0` surface.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/api/v0/add` | Add a blob (multipart part `file`) |
//! | POST   | `/api/v0/version` | Reachability probe |
//!
//! The IPFS API accepts POST only, including for read-only RPCs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::config::{ContentBackend, ContentStoreConfig};
use crate::error::ContentStoreError;
use crate::types::ContentId;
use crate::ContentStore;

/// API version path segment.
const API_PREFIX: &str = "api/v0";

/// IPFS HTTP API client.
#[derive(Debug, Clone)]
pub struct IpfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl IpfsClient {
    /// Build a client for the IPFS endpoint in `config`.
    pub fn new(config: &ContentStoreConfig) -> Result<Self, ContentStoreError> {
        let endpoint = match &config.backend {
            ContentBackend::Ipfs(url) => url,
            ContentBackend::Memory => {
                return Err(ContentStoreError::Unavailable(
                    "IpfsClient requires an http(s) endpoint".into(),
                ))
            }
        };

        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ContentStoreError::Unavailable("content store token is not a valid header value".into()))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ContentStoreError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: endpoint.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, rpc: &str) -> String {
        format!("{}/{API_PREFIX}/{rpc}", self.base_url)
    }
}

#[async_trait]
impl ContentStore for IpfsClient {
    fn name(&self) -> &'static str {
        "ipfs"
    }

    /// Add `bytes` to IPFS.
    ///
    /// Calls `POST {base_url}/api/v0/add` once; no retry.
    async fn store(&self, bytes: Vec<u8>) -> Result<ContentId, ContentStoreError> {
        let endpoint = "POST /api/v0/add";
        let size = bytes.len();

        let part = Part::bytes(bytes)
            .file_name("certificate")
            .mime_str("application/octet-stream")
            .map_err(|e| ContentStoreError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(self.url("add"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ContentStoreError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| ContentStoreError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(ContentStoreError::ApiError {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        let cid = extract_cid(&body).ok_or_else(|| ContentStoreError::Deserialization {
            endpoint: endpoint.into(),
            reason: format!("no Hash or cid field in response: {body}"),
        })?;

        tracing::debug!(cid = %cid, size, "stored blob in IPFS");
        Ok(ContentId::new(cid))
    }

    async fn health_check(&self) -> Result<(), ContentStoreError> {
        let endpoint = "POST /api/v0/version";
        let resp = self
            .http
            .post(self.url("version"))
            .send()
            .await
            .map_err(|e| ContentStoreError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ContentStoreError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }
        Ok(())
    }
}

/// Pull the content identifier out of an `add` response.
///
/// Kubo streams one JSON object per line and reports the CID as `Hash`.
/// IPFS Cluster's REST API reports it as `cid`, either a plain string or a
/// `{"/": "..."}` link object. The last object describes the root.
fn extract_cid(body: &str) -> Option<String> {
    let last = body.lines().map(str::trim).filter(|l| !l.is_empty()).last()?;
    let value: serde_json::Value = serde_json::from_str(last).ok()?;

    let cid = value
        .get("Hash")
        .and_then(|v| v.as_str())
        .or_else(|| match value.get("cid")? {
            serde_json::Value::String(s) => Some(s.as_str()),
            obj => obj.get("/").and_then(|v| v.as_str()),
        })?;

    let cid = cid.trim();
    (!cid.is_empty()).then(|| cid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_cid_from_kubo_response() {
        let body = r#"{"Name":"certificate","Hash":"QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG","Size":"12"}"#;
        assert_eq!(
            extract_cid(body).as_deref(),
            Some("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG")
        );
    }

    #[test]
    fn extract_cid_uses_last_line_of_stream() {
        let body = "{\"Name\":\"a\",\"Hash\":\"QmFirst\"}\n{\"Name\":\"\",\"Hash\":\"QmRoot\"}\n";
        assert_eq!(extract_cid(body).as_deref(), Some("QmRoot"));
    }

    #[test]
    fn extract_cid_from_cluster_string() {
        let body = r#"{"name":"certificate","cid":"bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi","size":12}"#;
        assert_eq!(
            extract_cid(body).as_deref(),
            Some("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi")
        );
    }

    #[test]
    fn extract_cid_from_cluster_link_object() {
        let body = r#"{"name":"certificate","cid":{"/":"bafyLink"},"size":12}"#;
        assert_eq!(extract_cid(body).as_deref(), Some("bafyLink"));
    }

    #[test]
    fn extract_cid_rejects_missing_field() {
        assert_eq!(extract_cid(r#"{"Name":"x"}"#), None);
        assert_eq!(extract_cid(""), None);
        assert_eq!(extract_cid("not json"), None);
        assert_eq!(extract_cid(r#"{"Hash":"  "}"#), None);
    }

    #[test]
    fn new_rejects_memory_backend() {
        let cfg = ContentStoreConfig::memory();
        assert!(matches!(
            IpfsClient::new(&cfg),
            Err(ContentStoreError::Unavailable(_))
        ));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = ContentStoreConfig::ipfs("http://127.0.0.1:9095/").unwrap();
        let client = IpfsClient::new(&cfg).unwrap();
        assert_eq!(client.url("add"), "http://127.0.0.1:9095/api/v0/add");
    }
}
