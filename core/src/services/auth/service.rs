//! Main authentication service implementation

use std::sync::Arc;

use tokio::sync::OnceCell;

use bc_shared::utils::validation::{
    is_valid_email, is_valid_name, is_valid_password, is_valid_phone_number, is_valid_user_id,
    sanitize_input,
};

use crate::domain::entities::user::User;
use crate::domain::value_objects::LoginResult;
use crate::errors::{AuthError, DomainError, DomainResult, RegistrationFlags};
use crate::repositories::{SessionStore, UserRepository};
use crate::services::token::SessionManager;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Raw registration input as received from a client
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone_number: String,
}

/// Hashed once per service to give unknown user ids a real bcrypt verify
const DUMMY_PASSWORD: &str = "bchat-dummy-password";

/// Authentication service: account registration and password login
pub struct AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repository: Arc<U>,
    session_manager: Arc<SessionManager<S>>,
    config: AuthServiceConfig,
    dummy_hash: OnceCell<String>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(
        user_repository: Arc<U>,
        session_manager: Arc<SessionManager<S>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_manager,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new account
    ///
    /// Text fields are sanitized before validation; the password is taken
    /// verbatim. Every field is checked so the caller learns all failures at
    /// once. A taken `user_id` is reported the same way as a malformed one.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::InvalidRegistration(flags)))` - One or more fields rejected
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        let user_id = sanitize_input(&input.user_id);
        let email = sanitize_input(&input.email);
        let name = sanitize_input(&input.name);
        let phone_number = sanitize_input(&input.phone_number);

        let mut flags = RegistrationFlags {
            name: !is_valid_name(&name),
            user_id: !is_valid_user_id(&user_id),
            email: !is_valid_email(&email),
            phone_number: !is_valid_phone_number(&phone_number),
            password: !is_valid_password(&input.password),
        };

        if !flags.user_id && self.user_repository.exists_by_user_id(&user_id).await? {
            flags.user_id = true;
        }

        if flags.any() {
            tracing::info!(
                user_id = %user_id,
                failed_fields = %flags,
                event = "registration_rejected",
                "Registration rejected"
            );
            return Err(AuthError::InvalidRegistration(flags).into());
        }

        let cost = self.config.bcrypt_cost;
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })??;

        let user = User::new(user_id, email, name, password_hash, phone_number);

        let created = match self.user_repository.create(user).await {
            Ok(created) => created,
            // Lost a race against a concurrent registration of the same id
            Err(DomainError::Auth(AuthError::UserAlreadyExists)) => {
                return Err(AuthError::InvalidRegistration(RegistrationFlags {
                    user_id: true,
                    ..Default::default()
                })
                .into());
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            user_id = %created.user_id,
            event = "user_registered",
            "Registered new user"
        );

        Ok(created)
    }

    /// Authenticate with user id and password, issuing a session token
    ///
    /// Any earlier token for the same user stops validating once this returns.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResult)` - Token and its lifetime
    /// * `Err(DomainError::Auth(AuthError::AuthenticationFailed))` - Unknown user or wrong password
    /// * `Err(DomainError::Token(TokenError::TokenPersistenceFailed))` - The session could not be stored
    pub async fn login(&self, user_id: &str, password: &str) -> DomainResult<LoginResult> {
        let user_id = sanitize_input(user_id);

        let user = self.user_repository.find_by_user_id(&user_id).await?;

        // Unknown ids still pay for a bcrypt verify so timing does not reveal them
        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash().await?.to_string(),
        };
        let matches = self.verify(password, hash).await?;

        let Some(user) = user else {
            tracing::info!(
                user_id = %user_id,
                event = "login_failed",
                "Login failed: unknown user"
            );
            return Err(AuthError::AuthenticationFailed.into());
        };

        if !matches {
            tracing::info!(
                user_id = %user_id,
                event = "login_failed",
                "Login failed: wrong password"
            );
            return Err(AuthError::AuthenticationFailed.into());
        }

        let token = self.session_manager.generate_token(&user.user_id).await?;

        Ok(LoginResult {
            token,
            expires_in: self.session_manager.expiry_duration_sec(),
        })
    }

    async fn verify(&self, password: &str, hash: String) -> DomainResult<bool> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })
    }

    /// Hash of a fixed password at the configured cost, computed on first use
    pub(crate) async fn dummy_hash(&self) -> DomainResult<&str> {
        let cost = self.config.bcrypt_cost;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(move || hash_password(DUMMY_PASSWORD, cost))
                    .await
                    .map_err(|e| DomainError::Internal {
                        message: format!("Password hashing task failed: {}", e),
                    })?
            })
            .await?;
        Ok(hash.as_str())
    }

    #[cfg(test)]
    pub(crate) fn has_dummy_hash(&self) -> bool {
        self.dummy_hash.initialized()
    }
}
