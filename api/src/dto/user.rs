use serde::{Deserialize, Serialize};

use bc_core::services::RegisterUser;

/// Body of `POST /api/v1/users/register`
///
/// Missing fields deserialize as empty strings so they are reported through
/// the per-field registration flags instead of a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone_number: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(request: RegisterRequest) -> Self {
        RegisterUser {
            user_id: request.user_id,
            email: request.email,
            name: request.name,
            password: request.password,
            phone_number: request.phone_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
}
