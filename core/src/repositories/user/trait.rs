//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Users are addressed by their public `user_id`, which is unique across the
/// store and doubles as the session token subject.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their public id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, DomainError>;

    /// Check whether a user with the given public id exists
    async fn exists_by_user_id(&self, user_id: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - The public id is taken
    /// * `Err(DomainError)` - Any other persistence failure
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
