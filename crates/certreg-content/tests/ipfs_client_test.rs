//! Contract tests for IpfsClient against the IPFS HTTP API.
//!
//! These tests use wiremock to simulate a Kubo daemon / IPFS Cluster proxy.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/api/v0/add` | `store_*` |
//! | POST   | `/api/v0/version` | `health_check_*` |

use certreg_content::{ContentStore, ContentStoreConfig, ContentStoreError, IpfsClient};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Build an IpfsClient pointed at a wiremock server.
fn test_client(mock_server: &MockServer) -> IpfsClient {
    let config = ContentStoreConfig::ipfs(&mock_server.uri()).unwrap();
    IpfsClient::new(&config).unwrap()
}

// ── POST /api/v0/add ─────────────────────────────────────────────────

#[tokio::test]
async fn store_posts_multipart_and_returns_hash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Name":"certificate","Hash":"QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG","Size":"20"}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let cid = client.store(b"%PDF-1.7 diploma".to_vec()).await.unwrap();
    assert_eq!(cid.as_str(), "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
}

#[tokio::test]
async fn store_sends_bytes_in_file_part() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(|req: &Request| {
            let content_type = req
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = String::from_utf8_lossy(&req.body).to_string();
            if content_type.starts_with("multipart/form-data")
                && body.contains("name=\"file\"")
                && body.contains("%PDF-payload")
            {
                ResponseTemplate::new(200).set_body_string(r#"{"Hash":"QmOk"}"#)
            } else {
                ResponseTemplate::new(400).set_body_string("unexpected request shape")
            }
        })
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let cid = client.store(b"%PDF-payload".to_vec()).await.unwrap();
    assert_eq!(cid.as_str(), "QmOk");
}

#[tokio::test]
async fn store_accepts_cluster_cid_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"name":"certificate","cid":{"/":"bafybeiclustercid"},"size":20}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let cid = client.store(b"bytes".to_vec()).await.unwrap();
    assert_eq!(cid.as_str(), "bafybeiclustercid");
}

#[tokio::test]
async fn store_maps_non_success_status_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(ResponseTemplate::new(500).set_body_string("blockstore full"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    match client.store(b"bytes".to_vec()).await.unwrap_err() {
        ContentStoreError::ApiError { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("blockstore full"));
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}

#[tokio::test]
async fn store_does_not_retry_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.store(b"bytes".to_vec()).await.is_err());
    // `expect(1)` is verified when the mock server drops.
}

#[tokio::test]
async fn store_rejects_response_without_cid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Name":"certificate"}"#))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(matches!(
        client.store(b"bytes".to_vec()).await,
        Err(ContentStoreError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn store_reports_transport_error_when_unreachable() {
    // Nothing listens on port 1.
    let config = ContentStoreConfig::ipfs("http://127.0.0.1:1").unwrap();
    let client = IpfsClient::new(&config).unwrap();
    assert!(matches!(
        client.store(b"bytes".to_vec()).await,
        Err(ContentStoreError::Http { .. })
    ));
}

#[tokio::test]
async fn store_sends_bearer_token_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/add"))
        .and(header("authorization", "Bearer cluster-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Hash":"QmAuthed"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = ContentStoreConfig::ipfs(&mock_server.uri()).unwrap();
    config.api_token = Some("cluster-secret".into());
    let client = IpfsClient::new(&config).unwrap();
    let cid = client.store(b"bytes".to_vec()).await.unwrap();
    assert_eq!(cid.as_str(), "QmAuthed");
}

// ── POST /api/v0/version ─────────────────────────────────────────────

#[tokio::test]
async fn health_check_succeeds_on_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Version": "0.29.0"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client.health_check().await.unwrap();
}

#[tokio::test]
async fn health_check_fails_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/version"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(matches!(
        client.health_check().await,
        Err(ContentStoreError::ApiError { status: 502, .. })
    ));
}
