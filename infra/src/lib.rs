//! # Infrastructure Layer
//!
//! Concrete implementations of the repository and store traits declared in
//! `bc_core`:
//! - **Database**: MySQL user and chat membership repositories using SQLx
//! - **Cache**: Redis client plus Redis-backed session and message stores
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis support (default)

use bc_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and Redis-backed stores
pub mod cache;

/// Configuration types used by this crate
pub mod config {
    pub use bc_shared::config::{CacheConfig, DatabaseConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Migration(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Cache(e) => DomainError::Cache(e.to_string()),
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
