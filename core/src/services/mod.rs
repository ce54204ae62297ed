//! Business services containing domain logic and use cases.

pub mod auth;
pub mod chat;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RegisterUser};
pub use chat::ChatService;
pub use token::{RevocationCache, SessionManager, TokenCodec};
