use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use bc_core::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChatRequest {
    /// Public id of the other participant
    #[validate(length(min = 1, max = 64))]
    pub to_user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatResponse {
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 64))]
    pub chat_id: String,

    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetMessagesRequest {
    #[validate(length(min = 1, max = 64))]
    pub chat_id: String,
}

/// One message as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub chat_id: String,
    pub user_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for MessageView {
    fn from(message: ChatMessage) -> Self {
        Self {
            chat_id: message.chat_id,
            user_id: message.user_id,
            message: message.message,
            created_at: message.sent_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatListResponse {
    pub chat_ids: Vec<String>,
}
