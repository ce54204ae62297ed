//! # BChat API
//!
//! HTTP surface of the BChat backend: registration, login and the
//! session-protected chat endpoints. Exposed as a library so integration
//! tests can build the same application the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
