use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ts_api::app::{create_app, AppState};
use ts_api::telemetry::init_tracing;
use ts_core::services::verification::{
    ExpiryReaper, InMemoryCodeStore, IssuanceService, ValidationService, VerificationServiceConfig,
};
use ts_infra::inference::InferenceClient;
use ts_infra::notifier::build_notifier;
use ts_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config.logging);

    info!(
        mode = %config.verification.mode,
        notifier_configured = config.notifier_configured(),
        model = %config.inference.model_id,
        "Starting TideScan API server"
    );

    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = build_notifier(config.smtp.as_ref()).context("Failed to create notifier")?;

    let service_config = VerificationServiceConfig::from(&config.verification);
    let validation = Arc::new(ValidationService::new(
        store.clone(),
        service_config.max_attempts,
    ));
    let issuance = Arc::new(IssuanceService::new(store.clone(), notifier, service_config));
    let inference = Arc::new(
        InferenceClient::new(&config.inference).context("Failed to create inference client")?,
    );

    let reaper = config
        .verification
        .reaper_interval_secs
        .map(|secs| ExpiryReaper::new(store.clone(), Duration::from_secs(secs)).spawn());

    let app_state = web::Data::new(AppState {
        issuance,
        validation,
        inference,
        notifier_configured: config.notifier_configured(),
        max_upload_bytes: config.server.max_payload_size,
    });

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = reaper {
        handle.abort();
    }
    info!("Server stopped");
    Ok(())
}
