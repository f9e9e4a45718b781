//! Exchange token store behavior tests.

use std::sync::Arc;

use chrono::{Duration, Utc};

use super::helpers::test_identity;
use crate::{ExchangeTokenStore, TokenError, TOKEN_TTL_SECS};

#[tokio::test]
async fn test_issue_then_consume_returns_identity() {
    let store = ExchangeTokenStore::new();

    let issued = store.issue(test_identity()).await;
    assert!(!issued.token.is_empty());
    assert_eq!(
        (issued.expires_at - issued.issued_at).num_seconds(),
        TOKEN_TTL_SECS
    );

    let identity = store.consume(&issued.token).await.unwrap();
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(store.pending_count().await, 0);
}

#[tokio::test]
async fn test_consume_is_single_use() {
    let store = ExchangeTokenStore::new();
    let issued = store.issue(test_identity()).await;

    assert!(store.consume(&issued.token).await.is_ok());

    let second = store.consume(&issued.token).await;
    assert!(matches!(second, Err(TokenError::NotFound)));
}

#[tokio::test]
async fn test_unknown_token_not_found() {
    let store = ExchangeTokenStore::new();
    let result = store.consume("no-such-token").await;
    assert!(matches!(result, Err(TokenError::NotFound)));
}

#[tokio::test]
async fn test_tokens_are_unique_and_unguessable_length() {
    let store = ExchangeTokenStore::new();
    let a = store.issue(test_identity()).await;
    let b = store.issue(test_identity()).await;

    assert_ne!(a.token, b.token);
    // 32 random bytes, URL-safe base64 without padding.
    assert_eq!(a.token.len(), 43);
}

#[tokio::test]
async fn test_consume_just_before_deadline_succeeds() {
    let store = ExchangeTokenStore::new();
    let issued = store.issue(test_identity()).await;

    // One second of validity left.
    store
        .force_expires_at(&issued.token, Utc::now() + Duration::seconds(1))
        .await;

    assert!(store.consume(&issued.token).await.is_ok());
}

#[tokio::test]
async fn test_consume_past_deadline_reports_expired_and_removes() {
    let store = ExchangeTokenStore::new();
    let issued = store.issue(test_identity()).await;

    store
        .force_expires_at(&issued.token, Utc::now() - Duration::seconds(1))
        .await;

    let first = store.consume(&issued.token).await;
    assert!(matches!(first, Err(TokenError::Expired)));

    // Expiry was a terminal transition: the entry is gone, so a retry is
    // NotFound rather than Expired.
    let second = store.consume(&issued.token).await;
    assert!(matches!(second, Err(TokenError::NotFound)));
}

#[tokio::test]
async fn test_concurrent_consume_yields_exactly_one_success() {
    let store = Arc::new(ExchangeTokenStore::new());
    let issued = store.issue(test_identity()).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let token = issued.token.clone();
        handles.push(tokio::spawn(
            async move { store.consume(&token).await.is_ok() },
        ));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}

#[tokio::test]
async fn test_sweep_evicts_only_expired() {
    let store = ExchangeTokenStore::new();
    let stale = store.issue(test_identity()).await;
    let live = store.issue(test_identity()).await;

    store
        .force_expires_at(&stale.token, Utc::now() - Duration::seconds(1))
        .await;

    assert_eq!(store.sweep().await, 1);
    assert_eq!(store.pending_count().await, 1);

    // Swept token is gone; the live one still redeems.
    assert!(matches!(
        store.consume(&stale.token).await,
        Err(TokenError::NotFound)
    ));
    assert!(store.consume(&live.token).await.is_ok());
}

#[tokio::test]
async fn test_sweep_task_runs() {
    let store = Arc::new(ExchangeTokenStore::new());
    let issued = store.issue(test_identity()).await;
    store
        .force_expires_at(&issued.token, Utc::now() - Duration::seconds(1))
        .await;

    let handle = crate::spawn_sweep_task(Arc::clone(&store), 1);
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    handle.abort();

    assert_eq!(store.pending_count().await, 0);
}
