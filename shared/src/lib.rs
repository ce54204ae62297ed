//! Shared utilities and common types for the BChat server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The JSON error body returned by every endpoint
//! - Input validation and sanitization helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, ServerConfig,
    SessionConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
