//! Session token module
//!
//! - `codec` - HS256 signing and verification with a per-process secret
//! - `revocation` - bounded FIFO set of recently superseded tokens
//! - `service` - single-active-session manager backed by a `SessionStore`

mod codec;
mod revocation;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use revocation::RevocationCache;
pub use service::SessionManager;
