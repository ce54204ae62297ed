//! Unit tests for mock session store

use std::time::Duration;

use crate::errors::DomainError;
use crate::repositories::session::{MockSessionStore, SessionStore};

#[tokio::test]
async fn test_set_get_delete() {
    let store = MockSessionStore::new();

    store.set("alice", "token-1", 60).await.unwrap();
    assert_eq!(store.get("alice").await.unwrap().as_deref(), Some("token-1"));

    store.set("alice", "token-2", 60).await.unwrap();
    assert_eq!(store.get("alice").await.unwrap().as_deref(), Some("token-2"));
    assert_eq!(store.len().await, 1);

    assert!(store.delete("alice").await.unwrap());
    assert!(!store.delete("alice").await.unwrap());
    assert_eq!(store.get("alice").await.unwrap(), None);
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let store = MockSessionStore::new();
    store.set("alice", "token", 1).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(store.get("alice").await.unwrap(), None);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_injected_failures() {
    let store = MockSessionStore::new();
    let handle = store.clone();

    handle.fail_writes(true);
    assert!(matches!(
        store.set("alice", "token", 60).await,
        Err(DomainError::Cache(_))
    ));

    handle.fail_writes(false);
    store.set("alice", "token", 60).await.unwrap();

    handle.fail_reads(true);
    assert!(store.get("alice").await.is_err());
    assert!(store.delete("alice").await.is_err());
}
