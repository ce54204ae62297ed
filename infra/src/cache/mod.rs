//! Cache module for Redis-backed storage
//!
//! Session tokens and chat messages live in Redis under distinct key
//! prefixes, so the two never collide.

pub mod message_store;
pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use message_store::RedisMessageStore;
pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use bc_shared::config::CacheConfig;
