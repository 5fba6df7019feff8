//! Types exchanged with the inference service

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Image submitted for scanning
#[derive(Debug, Clone)]
pub struct ScanUpload {
    pub bytes: Vec<u8>,
    /// Content type declared by the client, if any
    pub content_type: Option<String>,
}

impl ScanUpload {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn kind(&self) -> ImageKind {
        ImageKind::from_content_type(self.content_type.as_deref())
    }

    /// Lowercase hex SHA-256 of the raw bytes
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Image formats forwarded upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// PNG when the declared type mentions png, JPEG for everything else
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().contains("png") => ImageKind::Png,
            _ => ImageKind::Jpeg,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ImageKind::Png => "image.png",
            ImageKind::Jpeg => "image.jpg",
        }
    }
}

/// Detection summary returned by `/scan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub image_sha256: String,
    /// Detections per class label
    pub counts: BTreeMap<String, u64>,
    /// Raw predictions as returned upstream
    pub predictions: Vec<Value>,
}

impl ScanReport {
    /// Summarize an upstream response body
    ///
    /// A missing or null `predictions` field counts as no detections.
    /// Predictions without a string `class` are kept but not counted.
    pub fn from_response(image_sha256: String, body: &Value) -> Self {
        let predictions = body
            .get("predictions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut counts = BTreeMap::new();
        for class in predictions
            .iter()
            .filter_map(|p| p.get("class").and_then(Value::as_str))
            .filter(|c| !c.is_empty())
        {
            *counts.entry(class.to_string()).or_insert(0) += 1;
        }

        Self {
            image_sha256,
            counts,
            predictions,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}
