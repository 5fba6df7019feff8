//! Inference service client
//!
//! Forwards an uploaded image to the hosted detection model as a multipart
//! `file` part and summarizes the predictions.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use ts_shared::config::InferenceConfig;

use super::error::ProxyError;
use super::types::{ScanReport, ScanUpload};

/// HTTP client for the detection model
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: Client,
    endpoint: String,
    model_id: String,
    api_key: String,
    confidence: u8,
    overlap: u8,
}

impl InferenceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, ProxyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.api_key.is_empty() {
            warn!("ROBOFLOW_API_KEY is empty; upstream will reject scans");
        }

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
            confidence: config.confidence,
            overlap: config.overlap,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Run detection on an image
    pub async fn scan(&self, upload: ScanUpload) -> Result<ScanReport, ProxyError> {
        if upload.bytes.is_empty() {
            warn!("Empty image received");
            return Err(ProxyError::EmptyPayload);
        }

        let kind = upload.kind();
        let image_sha256 = upload.sha256();
        info!(
            size = upload.bytes.len(),
            content_type = upload.content_type.as_deref().unwrap_or("unknown"),
            mime = kind.mime(),
            "Forwarding image to inference service"
        );

        let part = Part::bytes(upload.bytes)
            .file_name(kind.file_name())
            .mime_str(kind.mime())?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.clone()),
                ("confidence", self.confidence.to_string()),
                ("overlap", self.overlap.to_string()),
            ])
            .multipart(form)
            .send()
            .await
            .map_err(|e| log_transport_error(e.into()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| log_transport_error(e.into()))?;
        debug!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body[..body.len().min(500)]),
            "Inference service response"
        );

        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Inference service rejected the image");
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let body: Value = serde_json::from_slice(&body)?;
        let report = ScanReport::from_response(image_sha256, &body);

        info!(
            predictions = report.predictions.len(),
            detected = report.total(),
            "Scan completed"
        );
        Ok(report)
    }
}

fn log_transport_error(err: ProxyError) -> ProxyError {
    match &err {
        ProxyError::UpstreamTimeout => error!("Inference request timed out"),
        other => error!(error = %other, "Inference request failed"),
    }
    err
}
