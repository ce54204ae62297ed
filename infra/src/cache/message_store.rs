//! Redis-backed chat message store
//!
//! Each message is a hash at `chat:{chat_id}:{message_id}` with the fields
//! `user_id`, `message` and `sent_at` (RFC 3339). Messages carry no TTL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use bc_core::domain::entities::chat::ChatMessage;
use bc_core::errors::DomainError;
use bc_core::repositories::MessageStore;

use super::redis_client::{escape_glob, RedisClient};

/// Key prefix of the chat partition
const CHAT_KEY_PREFIX: &str = "chat:";

const FIELD_USER_ID: &str = "user_id";
const FIELD_MESSAGE: &str = "message";
const FIELD_SENT_AT: &str = "sent_at";

#[derive(Clone)]
pub struct RedisMessageStore {
    client: RedisClient,
}

impl RedisMessageStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub(crate) fn key(chat_id: &str, message_id: &str) -> String {
        format!("{}{}:{}", CHAT_KEY_PREFIX, chat_id, message_id)
    }

    pub(crate) fn pattern(chat_id: &str) -> String {
        format!("{}{}:*", CHAT_KEY_PREFIX, escape_glob(chat_id))
    }

    /// Rebuild a message from its key and hash fields; `None` for foreign or partial entries
    pub(crate) fn decode(
        chat_id: &str,
        key: &str,
        fields: &HashMap<String, String>,
    ) -> Option<ChatMessage> {
        let prefix = format!("{}{}:", CHAT_KEY_PREFIX, chat_id);
        let message_id = key.strip_prefix(&prefix)?;
        if message_id.is_empty() || message_id.contains(':') {
            return None;
        }

        let sent_at = DateTime::parse_from_rfc3339(fields.get(FIELD_SENT_AT)?)
            .ok()?
            .with_timezone(&Utc);

        Some(ChatMessage {
            message_id: message_id.to_string(),
            chat_id: chat_id.to_string(),
            user_id: fields.get(FIELD_USER_ID)?.clone(),
            message: fields.get(FIELD_MESSAGE)?.clone(),
            sent_at,
        })
    }
}

#[async_trait]
impl MessageStore for RedisMessageStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), DomainError> {
        let key = Self::key(&message.chat_id, &message.message_id);
        let fields = [
            (FIELD_USER_ID, message.user_id.clone()),
            (FIELD_MESSAGE, message.message.clone()),
            (FIELD_SENT_AT, message.sent_at.to_rfc3339()),
        ];

        self.client
            .hset_multiple(&key, &fields)
            .await
            .map_err(DomainError::from)
    }

    async fn list(&self, chat_id: &str) -> Result<Vec<ChatMessage>, DomainError> {
        let keys = self.client.scan_match(&Self::pattern(chat_id)).await?;

        let mut messages = Vec::with_capacity(keys.len());
        for key in keys {
            let fields = self.client.hgetall(&key).await?;
            match Self::decode(chat_id, &key, &fields) {
                Some(message) => messages.push(message),
                None => tracing::warn!(key = %key, "Skipping malformed chat message entry"),
            }
        }

        messages.sort_by(|a, b| {
            a.sent_at
                .cmp(&b.sent_at)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });
        Ok(messages)
    }
}
