use serde::{Deserialize, Serialize};
use validator::Validate;

use bc_core::LoginResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Issued session token; send it back as `Authorization: Bearer {token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            token_type: "Bearer".to_string(),
            expires_in: result.expires_in,
        }
    }
}
