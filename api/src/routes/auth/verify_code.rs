use actix_web::{web, HttpResponse};
use validator::Validate;

use ts_core::services::verification::{CodeStore, Notifier};

use crate::app::AppState;
use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{handle_validation_errors, handle_verification_error};

/// Handler for POST /verify-code
///
/// Checks the submitted code. A successful check consumes the code.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "code": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Email verified successfully" }
/// ```
///
/// ## Errors
/// 400 Bad Request with `success: false` and one of `code_not_found`,
/// `code_expired`, `too_many_attempts` or `code_mismatch` (the latter
/// with `remaining_attempts`).
pub async fn verify_code<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    S: CodeStore + 'static,
    N: Notifier + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .validation
        .validate(&request.email, &request.code)
        .into_result()
    {
        Ok(()) => HttpResponse::Ok().json(VerifyCodeResponse {
            success: true,
            message: "Email verified successfully".to_string(),
        }),
        Err(error) => handle_verification_error(&error),
    }
}
