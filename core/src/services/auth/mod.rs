//! Authentication service module
//!
//! Registration of new accounts and password login issuing a session token.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, RegisterUser};
