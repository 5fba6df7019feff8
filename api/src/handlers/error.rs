//! Mapping of domain and proxy errors onto HTTP responses

use actix_web::{error::InternalError, http::StatusCode, HttpRequest, HttpResponse};
use chrono::Utc;
use tracing::{error, warn};
use validator::ValidationErrors;

use ts_core::errors::{IssuanceError, ValidationError};
use ts_infra::inference::ProxyError;
use ts_shared::errors::error_codes;

use crate::dto::auth::VerifyCodeFailure;
use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Handle issuance errors
pub fn handle_issuance_error(error: &IssuanceError) -> HttpResponse {
    match error {
        IssuanceError::InvalidIdentity => ErrorResponse::new(
            error_codes::INVALID_EMAIL,
            "Please provide a valid email address",
        )
        .to_response(StatusCode::BAD_REQUEST),
        IssuanceError::DispatchFailed { reason } => {
            error!(error = %reason, "Verification email could not be sent");
            ErrorResponse::new(
                error_codes::DISPATCH_FAILED,
                "Could not send the verification email. Please try again later",
            )
            .to_response(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle a rejected verification attempt
pub fn handle_verification_error(error: &ValidationError) -> HttpResponse {
    let (code, message, remaining_attempts) = match *error {
        ValidationError::NotFound => (
            error_codes::CODE_NOT_FOUND,
            "No verification code found for this email. Please request a new one",
            None,
        ),
        ValidationError::Expired => (
            error_codes::CODE_EXPIRED,
            "Verification code has expired. Please request a new one",
            None,
        ),
        ValidationError::TooManyAttempts => (
            error_codes::TOO_MANY_ATTEMPTS,
            "Too many failed attempts. Please request a new code",
            None,
        ),
        ValidationError::Mismatch { remaining, .. } => (
            error_codes::CODE_MISMATCH,
            "Invalid verification code",
            Some(remaining),
        ),
    };

    HttpResponse::BadRequest().json(VerifyCodeFailure {
        success: false,
        error: code.to_string(),
        message: message.to_string(),
        remaining_attempts,
        timestamp: Utc::now(),
    })
}

/// Handle inference proxy errors
pub fn handle_proxy_error(error: &ProxyError) -> HttpResponse {
    match error {
        ProxyError::EmptyPayload => {
            ErrorResponse::new(error_codes::EMPTY_PAYLOAD, "The uploaded image is empty")
                .to_response(StatusCode::BAD_REQUEST)
        }
        ProxyError::UpstreamError { status, body } => ErrorResponse::new(
            error_codes::UPSTREAM_ERROR,
            format!("Inference service returned {}: {}", status, body),
        )
        .add_detail("status", status)
        .add_detail("body", body)
        .to_response(StatusCode::BAD_GATEWAY),
        ProxyError::UpstreamTimeout => ErrorResponse::new(
            error_codes::UPSTREAM_TIMEOUT,
            "Timed out waiting for the inference service",
        )
        .to_response(StatusCode::GATEWAY_TIMEOUT),
        ProxyError::Internal(reason) => ErrorResponse::new(
            error_codes::INTERNAL_ERROR,
            format!("Internal error: {}", reason),
        )
        .to_response(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Handle request body validation failures
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    warn!(errors = %errors, "Request validation failed");
    response.to_response(StatusCode::BAD_REQUEST)
}

/// JSON extractor error handler producing the standard envelope
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    warn!(error = %err, "Rejected malformed JSON body");
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
