use serde::{Deserialize, Serialize};

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    /// Bearer token for subsequent requests
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: u64,
}
