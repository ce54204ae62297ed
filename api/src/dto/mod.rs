//! Request and response bodies

pub mod auth;
pub mod chat;
pub mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use chat::{
    ChatListResponse, CreateChatRequest, CreateChatResponse, GetMessagesRequest, MessageView,
    MessagesResponse, SendMessageRequest, SendMessageResponse,
};
pub use user::{RegisterRequest, RegisterResponse};
