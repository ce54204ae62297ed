//! In-memory implementation of ChatRepository for tests

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::chat::ChatMembership;
use crate::errors::DomainError;

use super::trait_::ChatRepository;

/// Mock chat repository backed by a vector of membership rows
#[derive(Clone, Default)]
pub struct MockChatRepository {
    rows: Arc<RwLock<Vec<ChatMembership>>>,
}

impl MockChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for MockChatRepository {
    async fn create(&self, memberships: Vec<ChatMembership>) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;

        let duplicate = memberships.iter().any(|new| {
            rows.iter()
                .any(|row| row.chat_id == new.chat_id && row.user_id == new.user_id)
        });
        if duplicate {
            return Err(DomainError::Conflict {
                message: "Membership already exists".to_string(),
            });
        }

        rows.extend(memberships);
        Ok(())
    }

    async fn find_membership(
        &self,
        chat_id: &str,
        user_id: &str,
    ) -> Result<Option<ChatMembership>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.chat_id == chat_id && row.user_id == user_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<String>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.chat_id.clone())
            .collect())
    }

    async fn find_shared_chat_id(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<String>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_a)
            .find(|a| {
                rows.iter()
                    .any(|b| b.chat_id == a.chat_id && b.user_id == user_b)
            })
            .map(|row| row.chat_id.clone()))
    }
}
