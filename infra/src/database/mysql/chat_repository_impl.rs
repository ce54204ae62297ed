//! MySQL implementation of the ChatRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use bc_core::domain::entities::chat::ChatMembership;
use bc_core::errors::DomainError;
use bc_core::repositories::ChatRepository;

use super::is_unique_violation;

/// MySQL implementation of ChatRepository over the `chats` membership table
pub struct MySqlChatRepository {
    pool: MySqlPool,
}

impl MySqlChatRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_chat_id(row: &sqlx::mysql::MySqlRow) -> Result<String, DomainError> {
        row.try_get("chat_id")
            .map_err(|e| DomainError::Database(format!("Failed to get chat_id: {}", e)))
    }
}

#[async_trait]
impl ChatRepository for MySqlChatRepository {
    async fn create(&self, memberships: Vec<ChatMembership>) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {}", e)))?;

        for membership in &memberships {
            sqlx::query("INSERT INTO chats (chat_id, user_id, created_at) VALUES (?, ?, ?)")
                .bind(&membership.chat_id)
                .bind(&membership.user_id)
                .bind(membership.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        DomainError::Conflict {
                            message: "Membership already exists".to_string(),
                        }
                    } else {
                        DomainError::Database(format!("Failed to create chat: {}", e))
                    }
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to commit chat: {}", e)))
    }

    async fn find_membership(
        &self,
        chat_id: &str,
        user_id: &str,
    ) -> Result<Option<ChatMembership>, DomainError> {
        let row = sqlx::query(
            "SELECT chat_id, user_id, created_at FROM chats WHERE chat_id = ? AND user_id = ? LIMIT 1",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(ChatMembership {
            chat_id: Self::row_to_chat_id(&row)?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| DomainError::Database(format!("Failed to get user_id: {}", e)))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
        }))
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT chat_id FROM chats WHERE user_id = ? ORDER BY created_at, chat_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        rows.iter().map(Self::row_to_chat_id).collect()
    }

    async fn find_shared_chat_id(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<String>, DomainError> {
        let query = r#"
            SELECT a.chat_id
            FROM chats a
            INNER JOIN chats b ON a.chat_id = b.chat_id
            WHERE a.user_id = ? AND b.user_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_a)
            .bind(user_b)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_chat_id).transpose()
    }
}
