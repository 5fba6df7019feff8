use actix_multipart::Multipart;
use actix_web::{http::StatusCode, web, HttpResponse};
use futures_util::StreamExt;
use tracing::{info, warn};

use ts_core::services::verification::{CodeStore, Notifier};
use ts_infra::inference::ScanUpload;
use ts_shared::errors::error_codes;

use crate::app::AppState;
use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::handlers::handle_proxy_error;

/// Form field carrying the image
const FILE_FIELD: &str = "file";

/// Handler for POST /scan
///
/// Accepts a `multipart/form-data` upload with a `file` part and returns the
/// detections reported by the inference service:
///
/// ```json
/// {
///     "image_sha256": "9f86d08...",
///     "counts": { "plastic": 2 },
///     "predictions": [ { "class": "plastic", "confidence": 0.91 } ]
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: empty or missing image, malformed multipart body
/// - 413 Payload Too Large: image exceeds the configured limit
/// - 502 Bad Gateway: the inference service answered with a non-200 status
/// - 504 Gateway Timeout: the inference service did not answer in time
/// - 500 Internal Server Error: any other failure
pub async fn scan<S, N>(state: web::Data<AppState<S, N>>, mut payload: Multipart) -> HttpResponse
where
    S: CodeStore + 'static,
    N: Notifier + ?Sized + 'static,
{
    let mut upload: Option<ScanUpload> = None;

    while let Some(field) = payload.next().await {
        let mut field = match field {
            Ok(field) => field,
            Err(e) => return malformed_upload(&e),
        };

        let is_file = field.name() == Some(FILE_FIELD);
        let content_type = field.content_type().map(|mime| mime.to_string());
        let mut bytes = Vec::new();

        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return malformed_upload(&e),
            };
            // Other fields are drained and dropped
            if !is_file {
                continue;
            }
            if bytes.len() + chunk.len() > state.max_upload_bytes {
                warn!(limit = state.max_upload_bytes, "Rejected oversized upload");
                return ErrorResponse::new(
                    error_codes::PAYLOAD_TOO_LARGE,
                    format!("Image exceeds {} bytes", state.max_upload_bytes),
                )
                .to_response(StatusCode::PAYLOAD_TOO_LARGE);
            }
            bytes.extend_from_slice(&chunk);
        }

        if is_file && upload.is_none() {
            upload = Some(ScanUpload::new(bytes, content_type));
        }
    }

    // A missing part is treated like an empty one
    let upload = upload.unwrap_or_else(|| ScanUpload::new(Vec::new(), None));
    info!(
        size = upload.bytes.len(),
        content_type = upload.content_type.as_deref().unwrap_or("unknown"),
        "Received scan upload"
    );

    match state.inference.scan(upload).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(error) => handle_proxy_error(&error),
    }
}

fn malformed_upload(error: &actix_multipart::MultipartError) -> HttpResponse {
    warn!(error = %error, "Malformed multipart upload");
    ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        format!("Malformed multipart body: {}", error),
    )
    .to_response(StatusCode::BAD_REQUEST)
}
