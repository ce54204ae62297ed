//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal row identifier
    pub id: Uuid,

    /// Public handle chosen at registration; unique and used as the token subject
    pub user_id: String,

    pub email: String,

    /// Display name
    pub name: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// E.164 formatted phone number
    pub phone_number: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(
        user_id: String,
        email: String,
        name: String,
        password_hash: String,
        phone_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            name,
            password_hash,
            phone_number,
            created_at: now,
            updated_at: now,
        }
    }
}
