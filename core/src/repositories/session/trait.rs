//! Key-value store holding the current session token per subject.

use async_trait::async_trait;

use crate::errors::DomainError;

/// TTL-capable key-value store shared by every server instance
///
/// Holds at most one entry per subject (last write wins). Entries disappear
/// on their own once the TTL elapses; nothing in this crate sweeps them.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `token` as the current token for `subject`, replacing any previous entry
    async fn set(&self, subject: &str, token: &str, ttl_secs: u64) -> Result<(), DomainError>;

    /// Current token for `subject`, or `None` when absent or expired
    async fn get(&self, subject: &str) -> Result<Option<String>, DomainError>;

    /// Remove the entry for `subject`; returns whether one existed
    async fn delete(&self, subject: &str) -> Result<bool, DomainError>;
}
