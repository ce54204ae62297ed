//! In-memory implementation of MessageStore for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::chat::ChatMessage;
use crate::errors::DomainError;

use super::trait_::MessageStore;

#[derive(Clone, Default)]
pub struct MockMessageStore {
    chats: Arc<RwLock<HashMap<String, Vec<ChatMessage>>>>,
}

impl MockMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MockMessageStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), DomainError> {
        self.chats
            .write()
            .await
            .entry(message.chat_id.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn list(&self, chat_id: &str) -> Result<Vec<ChatMessage>, DomainError> {
        let chats = self.chats.read().await;
        let mut messages = chats.get(chat_id).cloned().unwrap_or_default();
        messages.sort_by_key(|m| m.sent_at);
        Ok(messages)
    }
}
