//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, RegistrationFlags, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridged_errors_are_transparent() {
        let err: DomainError = TokenError::TokenPersistenceFailed.into();
        assert_eq!(err.to_string(), "Token persistence failed");

        let err: DomainError = AuthError::AuthenticationFailed.into();
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[test]
    fn test_registration_flags_message() {
        let flags = RegistrationFlags {
            email: true,
            phone_number: true,
            ..Default::default()
        };
        let err = AuthError::InvalidRegistration(flags);
        assert_eq!(err.to_string(), "Invalid registration fields: email, phone_number");
    }
}
