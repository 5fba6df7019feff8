//! Unit tests for the expiry reaper

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::services::verification::{CodeStore, ExpiryReaper, InMemoryCodeStore};

#[test]
fn test_run_once_purges_only_expired() {
    let store = Arc::new(InMemoryCodeStore::new());
    store.put("old@example.com", "111111", Duration::minutes(1));
    store.put("new@example.com", "222222", Duration::minutes(30));

    let reaper = ExpiryReaper::new(store.clone(), std::time::Duration::from_secs(60));

    assert_eq!(reaper.run_once(Utc::now()), 0);
    assert_eq!(reaper.run_once(Utc::now() + Duration::minutes(5)), 1);
    assert!(store.get("old@example.com").is_none());
    assert!(store.get("new@example.com").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_spawned_reaper_purges_periodically() {
    let store = Arc::new(InMemoryCodeStore::new());
    store.put("old@example.com", "111111", Duration::seconds(-1));

    let handle = ExpiryReaper::new(store.clone(), std::time::Duration::from_secs(30)).spawn();

    // Nothing happens before the first interval elapses
    tokio::task::yield_now().await;
    assert_eq!(store.len(), 1);

    tokio::time::sleep(std::time::Duration::from_secs(31)).await;
    assert!(store.is_empty());

    handle.abort();
}
