//! Shared fixtures for the HTTP tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;

use ts_api::app::AppState;
use ts_core::services::verification::{
    CodeGenerator, InMemoryCodeStore, IssuanceService, Notifier, ValidationService,
    VerificationServiceConfig,
};
use ts_infra::inference::InferenceClient;
use ts_infra::notifier::LogNotifier;
use ts_shared::config::{DeliveryMode, InferenceConfig};

pub const TEST_CODE: &str = "482913";

pub type TestState = AppState<InMemoryCodeStore, SwitchableNotifier>;

/// Generator always returning [`TEST_CODE`]
pub struct FixedGenerator;

impl CodeGenerator for FixedGenerator {
    fn generate(&self, _length: usize) -> String {
        TEST_CODE.to_string()
    }
}

/// Log notifier that can be told to reject dispatches
#[derive(Default)]
pub struct SwitchableNotifier {
    inner: LogNotifier,
    failing: AtomicBool,
}

impl SwitchableNotifier {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn dispatch_count(&self) -> u64 {
        self.inner.dispatch_count()
    }
}

#[async_trait]
impl Notifier for SwitchableNotifier {
    async fn dispatch(&self, identity: &str, code: &str) -> Result<String, String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err("relay refused the message".to_string());
        }
        self.inner.dispatch(identity, code).await
    }
}

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub store: Arc<InMemoryCodeStore>,
    pub notifier: Arc<SwitchableNotifier>,
}

pub fn context(mode: DeliveryMode) -> TestContext {
    context_with_inference(mode, InferenceConfig::default())
}

pub fn context_with_inference(mode: DeliveryMode, inference: InferenceConfig) -> TestContext {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(SwitchableNotifier::default());
    let config = VerificationServiceConfig {
        mode,
        ..Default::default()
    };

    let validation = Arc::new(ValidationService::new(store.clone(), config.max_attempts));
    let issuance = Arc::new(
        IssuanceService::new(store.clone(), notifier.clone(), config)
            .with_generator(Arc::new(FixedGenerator)),
    );
    let inference = Arc::new(InferenceClient::new(&inference).unwrap());

    let state = web::Data::new(AppState {
        issuance,
        validation,
        inference,
        notifier_configured: mode.is_production(),
        max_upload_bytes: 1024,
    });

    TestContext {
        state,
        store,
        notifier,
    }
}
