//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema migrations
//! - Repository implementations for users and chat memberships

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlChatRepository, MySqlUserRepository};
