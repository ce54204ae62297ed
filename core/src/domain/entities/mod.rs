//! Domain entities representing core business objects.

pub mod chat;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use chat::{ChatMembership, ChatMessage};
pub use session::{SessionClaims, SESSION_ISSUER};
pub use user::User;
