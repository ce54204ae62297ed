//! # BChat Core
//!
//! Core business logic and domain layer for the BChat backend.
//! This crate contains domain entities, the session token subsystem, business
//! services, repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{ChatMembership, ChatMessage, SessionClaims, User};
pub use domain::value_objects::LoginResult;
pub use errors::{AuthError, DomainError, DomainResult, RegistrationFlags, TokenError, ValidationError};
pub use repositories::{ChatRepository, MessageStore, SessionStore, UserRepository};
pub use services::{AuthService, AuthServiceConfig, ChatService, RegisterUser, SessionManager};
