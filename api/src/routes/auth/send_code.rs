use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use ts_core::services::verification::{CodeStore, Notifier};
use ts_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{handle_issuance_error, handle_validation_errors};

/// Handler for POST /send-code
///
/// Issues a fresh code for the email address, replacing any earlier one.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification code sent to your email",
///     "dev_code": "482913"
/// }
/// ```
/// `dev_code` is only present in developer mode.
///
/// ## Errors
/// - 400 Bad Request: missing or malformed email
/// - 503 Service Unavailable: the email could not be sent
pub async fn send_code<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    S: CodeStore + 'static,
    N: Notifier + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    info!(
        identity = %mask_email(request.email.trim()),
        "Processing send_code request"
    );

    match state.issuance.issue(&request.email).await {
        Ok(receipt) => {
            let message = if receipt.dispatched {
                "Verification code sent to your email"
            } else {
                "Verification code generated (developer mode)"
            };

            HttpResponse::Ok().json(SendCodeResponse {
                success: true,
                message: message.to_string(),
                dev_code: receipt.dev_code().map(str::to_string),
            })
        }
        Err(error) => handle_issuance_error(&error),
    }
}
