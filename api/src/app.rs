//! Application state and factory
//!
//! This module holds the state shared by every worker and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App};

use ts_core::services::verification::{CodeStore, IssuanceService, Notifier, ValidationService};
use ts_infra::inference::InferenceClient;
use ts_shared::config::CorsConfig;

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::auth::{send_code::send_code, verify_code::verify_code};
use crate::routes::{health::health_check, scan::scan};

/// Application state that holds shared services
pub struct AppState<S, N>
where
    S: CodeStore,
    N: Notifier + ?Sized,
{
    pub issuance: Arc<IssuanceService<S, N>>,
    pub validation: Arc<ValidationService<S>>,
    pub inference: Arc<InferenceClient>,
    /// Whether SMTP credentials were supplied
    pub notifier_configured: bool,
    /// Upper bound for uploaded images, in bytes
    pub max_upload_bytes: usize,
}

/// Create and configure the application with all dependencies
pub fn create_app<S, N>(
    app_state: web::Data<AppState<S, N>>,
    cors: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: CodeStore + 'static,
    N: Notifier + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Middleware order: CORS first, then logging
        .wrap(Logger::default())
        .wrap(create_cors(cors))
        .route("/health", web::get().to(health_check::<S, N>))
        .route("/send-code", web::post().to(send_code::<S, N>))
        .route("/verify-code", web::post().to(verify_code::<S, N>))
        .route("/scan", web::post().to(scan::<S, N>))
        .default_service(web::route().to(not_found))
}
