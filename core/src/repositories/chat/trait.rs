//! Chat membership repository trait.

use async_trait::async_trait;

use crate::domain::entities::chat::ChatMembership;
use crate::errors::DomainError;

/// Persistence for chat membership rows
///
/// A chat is identified by its `chat_id` and has one row per participant.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Insert all membership rows of a new chat atomically
    async fn create(&self, memberships: Vec<ChatMembership>) -> Result<(), DomainError>;

    /// Membership row for `user_id` in `chat_id`, if the user belongs to it
    async fn find_membership(
        &self,
        chat_id: &str,
        user_id: &str,
    ) -> Result<Option<ChatMembership>, DomainError>;

    /// Ids of every chat the user belongs to, oldest first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<String>, DomainError>;

    /// Id of a chat both users already belong to
    async fn find_shared_chat_id(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<String>, DomainError>;
}
