use actix_web::{web, HttpResponse};

use ts_core::services::verification::{CodeStore, Notifier};

use crate::app::AppState;
use crate::dto::health::HealthResponse;

/// Handler for GET /health
pub async fn health_check<S, N>(state: web::Data<AppState<S, N>>) -> HttpResponse
where
    S: CodeStore + 'static,
    N: Notifier + ?Sized + 'static,
{
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: state.inference.model_id().to_string(),
        notifier_configured: state.notifier_configured,
        mode: state.issuance.mode().to_string(),
    })
}
