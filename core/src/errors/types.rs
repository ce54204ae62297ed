//! Error type definitions for authentication, session tokens and validation

use serde::Serialize;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown user or wrong password; the two are deliberately indistinguishable
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid registration fields: {0}")]
    InvalidRegistration(RegistrationFlags),
}

/// Session token errors
///
/// Every variant except the two issuance failures is reported to clients as a
/// single generic "unauthorized" outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Token persistence failed")]
    TokenPersistenceFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        max: usize,
        actual: usize,
    },
}

/// Per-field failure flags reported by registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationFlags {
    #[serde(rename = "name_is_error")]
    pub name: bool,
    #[serde(rename = "user_id_is_error")]
    pub user_id: bool,
    #[serde(rename = "email_is_error")]
    pub email: bool,
    #[serde(rename = "phone_number_is_error")]
    pub phone_number: bool,
    #[serde(rename = "password_is_error")]
    pub password: bool,
}

impl RegistrationFlags {
    pub fn any(&self) -> bool {
        self.name || self.user_id || self.email || self.phone_number || self.password
    }

    fn failed_fields(&self) -> Vec<&'static str> {
        [
            (self.name, "name"),
            (self.user_id, "user_id"),
            (self.email, "email"),
            (self.phone_number, "phone_number"),
            (self.password, "password"),
        ]
        .into_iter()
        .filter_map(|(failed, field)| failed.then_some(field))
        .collect()
    }
}

impl std::fmt::Display for RegistrationFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.failed_fields().join(", "))
    }
}
