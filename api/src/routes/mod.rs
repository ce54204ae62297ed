//! Route handlers
//!
//! - `users`: account registration
//! - `auth`: password login issuing a session token
//! - `chat`: chat creation, messaging and listing behind the session middleware

pub mod auth;
pub mod chat;
pub mod users;
