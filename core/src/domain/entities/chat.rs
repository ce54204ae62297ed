//! Chat entities: membership rows and stored messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One participant's membership in a chat; a two-person chat has two rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMembership {
    pub chat_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMembership {
    pub fn new(chat_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id: user_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Both membership rows for a brand new chat between two users
    pub fn pair(user_a: &str, user_b: &str) -> (String, Vec<ChatMembership>) {
        let chat_id = Uuid::new_v4().to_string();
        let rows = vec![
            ChatMembership::new(chat_id.clone(), user_a),
            ChatMembership::new(chat_id.clone(), user_b),
        ];
        (chat_id, rows)
    }
}

/// A message posted to a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Random id, unique within the chat
    pub message_id: String,
    pub chat_id: String,
    /// Sender
    pub user_id: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(chat_id: impl Into<String>, user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message_id: Uuid::new_v4().simple().to_string(),
            chat_id: chat_id.into(),
            user_id: user_id.into(),
            message: message.into(),
            sent_at: Utc::now(),
        }
    }
}
