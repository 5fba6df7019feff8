//! Integration tests for the inference client against a fake upstream

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ts_infra::inference::{InferenceClient, ProxyError, ScanUpload};
use ts_shared::config::InferenceConfig;

fn client_for(server: &MockServer, timeout_secs: u64) -> InferenceClient {
    let config = InferenceConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
        timeout_secs,
        ..Default::default()
    };
    InferenceClient::new(&config).unwrap()
}

fn png_upload() -> ScanUpload {
    ScanUpload::new(b"fake-png-bytes".to_vec(), Some("image/png".to_string()))
}

#[tokio::test]
async fn test_scan_counts_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocean-waste/2"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("confidence", "40"))
        .and(query_param("overlap", "50"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"image.png\""))
        .and(body_string_contains("image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [
                {"class": "plastic", "confidence": 0.9},
                {"class": "plastic", "confidence": 0.6},
                {"class": "glass", "confidence": 0.8}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = png_upload();
    let expected_hash = upload.sha256();
    let report = client_for(&server, 5).scan(upload).await.unwrap();

    assert_eq!(report.image_sha256, expected_hash);
    assert_eq!(report.counts.get("plastic"), Some(&2));
    assert_eq!(report.counts.get("glass"), Some(&1));
    assert_eq!(report.predictions.len(), 3);
}

#[tokio::test]
async fn test_scan_defaults_to_jpeg() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("filename=\"image.jpg\""))
        .and(body_string_contains("image/jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
        .expect(1)
        .mount(&server)
        .await;

    let upload = ScanUpload::new(b"fake-image".to_vec(), None);
    let report = client_for(&server, 5).scan(upload).await.unwrap();

    assert!(report.counts.is_empty());
}

#[tokio::test]
async fn test_empty_payload_is_not_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server, 5)
        .scan(ScanUpload::new(Vec::new(), Some("image/png".to_string())))
        .await;

    assert_eq!(result.unwrap_err(), ProxyError::EmptyPayload);
}

#[tokio::test]
async fn test_upstream_error_passes_body_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden: invalid api key"))
        .mount(&server)
        .await;

    let result = client_for(&server, 5).scan(png_upload()).await;

    assert_eq!(
        result.unwrap_err(),
        ProxyError::UpstreamError {
            status: 403,
            body: "Forbidden: invalid api key".to_string(),
        }
    );
}

#[tokio::test]
async fn test_upstream_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"predictions": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = client_for(&server, 1).scan(png_upload()).await;

    assert_eq!(result.unwrap_err(), ProxyError::UpstreamTimeout);
}

#[tokio::test]
async fn test_invalid_json_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server, 5).scan(png_upload()).await;

    assert!(matches!(result, Err(ProxyError::Internal(_))));
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    // Nothing listens on port 1
    let config = InferenceConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 5,
        ..Default::default()
    };
    let client = InferenceClient::new(&config).unwrap();

    let result = client.scan(png_upload()).await;

    assert!(matches!(result, Err(ProxyError::Internal(_))));
}
