//! Chat service implementation

use std::sync::Arc;

use crate::domain::entities::chat::{ChatMembership, ChatMessage};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ChatRepository, MessageStore, UserRepository};

/// Maximum accepted message length in characters
const MAX_MESSAGE_LENGTH: usize = 4000;

/// Creates chats between users and reads or writes their messages
///
/// Callers pass an already authenticated user id; this service only checks
/// chat membership.
pub struct ChatService<C, U, M>
where
    C: ChatRepository,
    U: UserRepository,
    M: MessageStore,
{
    chat_repository: Arc<C>,
    user_repository: Arc<U>,
    message_store: Arc<M>,
}

impl<C, U, M> ChatService<C, U, M>
where
    C: ChatRepository,
    U: UserRepository,
    M: MessageStore,
{
    pub fn new(chat_repository: Arc<C>, user_repository: Arc<U>, message_store: Arc<M>) -> Self {
        Self {
            chat_repository,
            user_repository,
            message_store,
        }
    }

    /// Open a chat between `user_id` and `target_user_id`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Id of the new chat
    /// * `Err(DomainError::Validation)` - Empty target or a chat with oneself
    /// * `Err(DomainError::NotFound)` - Either user does not exist
    /// * `Err(DomainError::Conflict)` - The two users already share a chat
    pub async fn create_chat(&self, user_id: &str, target_user_id: &str) -> DomainResult<String> {
        let target_user_id = target_user_id.trim();
        if target_user_id.is_empty() {
            return Err(DomainError::Validation {
                message: "Target user id is required".to_string(),
            });
        }
        if target_user_id == user_id {
            return Err(DomainError::Validation {
                message: "Cannot open a chat with yourself".to_string(),
            });
        }

        for id in [user_id, target_user_id] {
            if !self.user_repository.exists_by_user_id(id).await? {
                return Err(DomainError::NotFound {
                    resource: format!("User {}", id),
                });
            }
        }

        if let Some(existing) = self
            .chat_repository
            .find_shared_chat_id(user_id, target_user_id)
            .await?
        {
            tracing::debug!(
                user_id = user_id,
                target_user_id = target_user_id,
                chat_id = %existing,
                "Chat already exists"
            );
            return Err(DomainError::Conflict {
                message: "Chat already exists".to_string(),
            });
        }

        let (chat_id, memberships) = ChatMembership::pair(user_id, target_user_id);
        self.chat_repository.create(memberships).await?;

        tracing::info!(
            user_id = user_id,
            target_user_id = target_user_id,
            chat_id = %chat_id,
            event = "chat_created",
            "Created chat"
        );

        Ok(chat_id)
    }

    /// Post a message to a chat the user belongs to
    pub async fn send_message(
        &self,
        user_id: &str,
        chat_id: &str,
        message: &str,
    ) -> DomainResult<ChatMessage> {
        if message.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Message must not be empty".to_string(),
            });
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::Validation {
                message: format!("Message exceeds {} characters", MAX_MESSAGE_LENGTH),
            });
        }

        self.require_membership(user_id, chat_id).await?;

        let message = ChatMessage::new(chat_id, user_id, message);
        self.message_store.append(&message).await?;

        tracing::debug!(
            user_id = user_id,
            chat_id = chat_id,
            message_id = %message.message_id,
            "Stored chat message"
        );

        Ok(message)
    }

    /// All messages of a chat the user belongs to, oldest first
    pub async fn get_messages(&self, user_id: &str, chat_id: &str) -> DomainResult<Vec<ChatMessage>> {
        self.require_membership(user_id, chat_id).await?;
        self.message_store.list(chat_id).await
    }

    /// Ids of every chat the user belongs to
    pub async fn list_chats(&self, user_id: &str) -> DomainResult<Vec<String>> {
        self.chat_repository.find_by_user(user_id).await
    }

    // Unknown chats and chats the user is not part of look the same
    async fn require_membership(&self, user_id: &str, chat_id: &str) -> DomainResult<()> {
        match self.chat_repository.find_membership(chat_id, user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                resource: format!("Chat {}", chat_id),
            }),
        }
    }
}
