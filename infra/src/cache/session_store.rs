//! Redis-backed session token store

use async_trait::async_trait;

use bc_core::errors::DomainError;
use bc_core::repositories::SessionStore;

use super::redis_client::RedisClient;

/// Key prefix of the access-token partition
const SESSION_KEY_PREFIX: &str = "access_token:";

/// Stores the current token of each subject as `access_token:{subject}` with SET EX
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub(crate) fn key(subject: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, subject)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, subject: &str, token: &str, ttl_secs: u64) -> Result<(), DomainError> {
        // Redis rejects SET EX 0. A failed write is reported, never retried.
        let ttl = ttl_secs.max(1);
        self.client
            .set_with_expiry_once(&Self::key(subject), token, ttl)
            .await
            .map_err(DomainError::from)
    }

    async fn get(&self, subject: &str) -> Result<Option<String>, DomainError> {
        self.client
            .get(&Self::key(subject))
            .await
            .map_err(DomainError::from)
    }

    async fn delete(&self, subject: &str) -> Result<bool, DomainError> {
        self.client
            .delete(&Self::key(subject))
            .await
            .map_err(DomainError::from)
    }
}
