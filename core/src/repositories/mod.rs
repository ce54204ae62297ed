pub mod chat;
pub mod message;
pub mod session;
pub mod user;

pub use chat::{ChatRepository, MockChatRepository};
pub use message::{MessageStore, MockMessageStore};
pub use session::{MockSessionStore, SessionStore};
pub use user::{MockUserRepository, UserRepository};
