//! In-memory SessionStore with wall-clock TTLs and injectable failures

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::SessionStore;

#[derive(Clone)]
struct Entry {
    token: String,
    expires_at: Instant,
}

/// Mock session store
///
/// Clones share the same underlying map, so a test can keep a handle while
/// the store itself is moved into a `SessionManager`.
#[derive(Clone, Default)]
pub struct MockSessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` and `delete` fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    fn unavailable() -> DomainError {
        DomainError::Cache("session store unavailable".to_string())
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn set(&self, subject: &str, token: &str, ttl_secs: u64) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }

        let expires_at = Instant::now() + Duration::from_secs(ttl_secs);
        self.entries.write().await.insert(
            subject.to_string(),
            Entry {
                token: token.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, subject: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }

        let entries = self.entries.read().await;
        Ok(entries
            .get(subject)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.token.clone()))
    }

    async fn delete(&self, subject: &str) -> Result<bool, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }

        let removed = self.entries.write().await.remove(subject);
        Ok(removed.is_some_and(|entry| entry.expires_at > Instant::now()))
    }
}
