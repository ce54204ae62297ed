//! Storage for chat messages.

use async_trait::async_trait;

use crate::domain::entities::chat::ChatMessage;
use crate::errors::DomainError;

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message to its chat
    async fn append(&self, message: &ChatMessage) -> Result<(), DomainError>;

    /// All messages of a chat ordered by send time (oldest first)
    async fn list(&self, chat_id: &str) -> Result<Vec<ChatMessage>, DomainError>;
}
