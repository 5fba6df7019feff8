//! Unit tests for code issuance

use std::sync::Arc;

use chrono::{Duration, Utc};
use ts_shared::config::{DeliveryMode, VerificationConfig, MAX_TTL_MINUTES};

use crate::domain::entities::verification_code::CODE_LENGTH;
use crate::errors::IssuanceError;
use crate::services::verification::{
    CodeStore, InMemoryCodeStore, IssuanceService, VerificationServiceConfig,
};

use super::mocks::{MockNotifier, SequenceGenerator};

fn production_config() -> VerificationServiceConfig {
    VerificationServiceConfig {
        mode: DeliveryMode::Production,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_issue_production_dispatches() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let service = IssuanceService::new(store.clone(), notifier.clone(), production_config());

    let receipt = service.issue("user@example.com").await.unwrap();

    assert!(receipt.dispatched);
    assert_eq!(receipt.code.len(), CODE_LENGTH);
    assert!(receipt.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(receipt.message_id.as_deref(), Some("mock-msg-1"));
    assert_eq!(receipt.dev_code(), None);
    assert_eq!(notifier.get_sent_code("user@example.com"), Some(receipt.code.clone()));
    assert_eq!(store.get("user@example.com").unwrap().code, receipt.code);
}

#[tokio::test]
async fn test_issue_developer_skips_notifier() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(true));
    let service =
        IssuanceService::new(store.clone(), notifier.clone(), VerificationServiceConfig::default())
            .with_generator(Arc::new(SequenceGenerator::new(&["482913"])));

    let receipt = service.issue("user@example.com").await.unwrap();

    assert!(!receipt.dispatched);
    assert_eq!(receipt.dev_code(), Some("482913"));
    assert_eq!(notifier.dispatch_count(), 0);
    assert!(store.get("user@example.com").is_some());
}

#[tokio::test]
async fn test_issue_normalizes_identity() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let service =
        IssuanceService::new(store.clone(), notifier, VerificationServiceConfig::default());

    let receipt = service.issue("  User@Example.COM ").await.unwrap();

    assert_eq!(receipt.identity, "user@example.com");
    assert!(store.get("user@example.com").is_some());
    assert!(store.get("User@Example.COM").is_none());
}

#[tokio::test]
async fn test_issue_rejects_invalid_email() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let service = IssuanceService::new(store.clone(), notifier.clone(), production_config());

    for bad in ["", "   ", "not-an-email", "user@localhost"] {
        assert_eq!(service.issue(bad).await.unwrap_err(), IssuanceError::InvalidIdentity);
    }
    assert!(store.is_empty());
    assert_eq!(notifier.dispatch_count(), 0);
}

#[tokio::test]
async fn test_dispatch_failure_keeps_record() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(true));
    let service = IssuanceService::new(store.clone(), notifier, production_config())
        .with_generator(Arc::new(SequenceGenerator::new(&["654321"])));

    let error = service.issue("user@example.com").await.unwrap_err();

    assert!(matches!(error, IssuanceError::DispatchFailed { .. }));
    assert_eq!(store.get("user@example.com").unwrap().code, "654321");
}

#[tokio::test]
async fn test_reissue_replaces_previous_code() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let service =
        IssuanceService::new(store.clone(), notifier, VerificationServiceConfig::default())
            .with_generator(Arc::new(SequenceGenerator::new(&["111111", "222222"])));

    service.issue("user@example.com").await.unwrap();
    store.increment_attempts("user@example.com");
    service.issue("user@example.com").await.unwrap();

    let record = store.get("user@example.com").unwrap();
    assert_eq!(record.code, "222222");
    assert_eq!(record.attempts, 0);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_issue_uses_configured_ttl_and_length() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let config = VerificationServiceConfig {
        code_length: 8,
        ttl: Duration::minutes(3),
        ..Default::default()
    };
    let service = IssuanceService::new(store, notifier, config);

    let before = Utc::now();
    let receipt = service.issue("user@example.com").await.unwrap();

    assert_eq!(receipt.code.len(), 8);
    assert!(receipt.expires_at >= before + Duration::minutes(3));
    assert!(receipt.expires_at <= Utc::now() + Duration::minutes(3));
}

#[tokio::test]
async fn test_issue_through_trait_object() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier: Arc<dyn crate::services::verification::Notifier> =
        Arc::new(MockNotifier::new(false));
    let service = IssuanceService::new(store, notifier, production_config());

    assert!(service.issue("user@example.com").await.unwrap().dispatched);
}

#[tokio::test]
async fn test_issue_with_oversized_ttl_setting() {
    let store = Arc::new(InMemoryCodeStore::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let settings = VerificationConfig {
        ttl_minutes: 1_000_000_000_000,
        ..Default::default()
    };
    let service = IssuanceService::new(store, notifier, VerificationServiceConfig::from(&settings));

    let receipt = service.issue("user@example.com").await.unwrap();
    assert!(receipt.expires_at <= Utc::now() + Duration::minutes(MAX_TTL_MINUTES));
}
