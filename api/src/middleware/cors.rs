//! CORS middleware configuration for cross-origin requests.
//!
//! The mobile and web clients call the API from other origins. With no
//! configured origins any origin is accepted; otherwise only the listed ones.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;
use ts_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config.allowed_origins.iter().fold(cors, |cors, origin| {
        info!(origin = %origin, "Adding allowed origin");
        cors.allowed_origin(origin)
    })
}
