//! Single-active-session manager

use bc_shared::config::SessionConfig;

use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;

use super::codec::TokenCodec;
use super::revocation::RevocationCache;

/// Issues and validates session tokens, one live token per subject
///
/// Built once at startup and shared by every request handler. The signing
/// secret and the revocation cache live exactly as long as this value.
///
/// Reissue runs as three independent store round trips (get, delete, set).
/// Two concurrent logins for the same subject can both succeed; the store
/// keeps whichever write landed last.
pub struct SessionManager<S: SessionStore> {
    pub(crate) store: S,
    codec: TokenCodec,
    revoked: RevocationCache,
    config: SessionConfig,
}

impl<S: SessionStore> SessionManager<S> {
    /// Creates a session manager with a freshly generated signing secret
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self::with_codec(store, TokenCodec::new(), config)
    }

    pub(crate) fn with_codec(store: S, codec: TokenCodec, config: SessionConfig) -> Self {
        Self {
            store,
            codec,
            revoked: RevocationCache::new(config.max_blacklist_size),
            config,
        }
    }

    /// Issues a new token for `subject`, superseding any current one
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new token, already persisted with the configured TTL
    /// * `Err(DomainError::Token(TokenError::TokenPersistenceFailed))` - The store write failed; no token was issued
    /// * `Err(DomainError)` - The lookup of the current token failed
    pub async fn generate_token(&self, subject: &str) -> Result<String, DomainError> {
        if subject.is_empty() {
            return Err(DomainError::Validation {
                message: "Token subject must not be empty".to_string(),
            });
        }

        if let Some(previous) = self.store.get(subject).await? {
            if !previous.is_empty() {
                self.revoked.add(&previous);
                if let Err(e) = self.store.delete(subject).await {
                    tracing::warn!(
                        subject = subject,
                        error = %e,
                        event = "session_delete_failed",
                        "Failed to delete superseded session token"
                    );
                }
                tracing::debug!(
                    subject = subject,
                    event = "session_superseded",
                    "Previous session token revoked"
                );
            }
        }

        let expiry = self.config.expiry_duration_sec;
        let token = self.codec.mint(subject, expiry)?;

        self.store
            .set(subject, &token, expiry)
            .await
            .map_err(|e| {
                tracing::error!(
                    subject = subject,
                    error = %e,
                    event = "session_persist_failed",
                    "Failed to persist session token"
                );
                DomainError::Token(TokenError::TokenPersistenceFailed)
            })?;

        tracing::info!(
            subject = subject,
            expires_in = expiry,
            event = "session_issued",
            "Issued session token"
        );

        Ok(token)
    }

    /// Current token for `subject`, `None` when absent, expired or unreadable
    pub async fn get_token(&self, subject: &str) -> Option<String> {
        match self.store.get(subject).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(
                    subject = subject,
                    error = %e,
                    event = "session_lookup_failed",
                    "Session store lookup failed"
                );
                None
            }
        }
    }

    /// Whether `token` is not recently superseded and carries a valid
    /// signature and unexpired claims
    pub fn validate_token(&self, token: &str) -> bool {
        self.check(token).is_ok()
    }

    /// Subject embedded in a verifiable token
    pub fn get_user_id_from_token(&self, token: &str) -> Option<String> {
        self.codec.verify(token).ok().map(|claims| claims.sub)
    }

    /// Strict check: `token` validates and is still the store's current
    /// token for its subject
    ///
    /// Unlike `validate_token`, this also rejects superseded tokens that have
    /// already been evicted from the revocation cache.
    pub async fn is_active_session(&self, token: &str) -> bool {
        match self.check(token) {
            Ok(subject) => self.get_token(&subject).await.as_deref() == Some(token),
            Err(_) => false,
        }
    }

    /// Resolves a bearer token to its subject, honouring `strict_single_session`
    pub async fn authenticate(&self, token: &str) -> Option<String> {
        let subject = self.check(token).ok()?;

        if self.config.strict_single_session && !self.is_active_session(token).await {
            tracing::debug!(
                subject = %subject,
                event = "session_not_current",
                "Rejected token that is no longer the current session"
            );
            return None;
        }

        Some(subject)
    }

    /// Token lifetime in seconds
    pub fn expiry_duration_sec(&self) -> u64 {
        self.config.expiry_duration_sec
    }

    /// Number of tokens currently held in the revocation cache
    pub fn revoked_count(&self) -> usize {
        self.revoked.len()
    }

    fn check(&self, token: &str) -> Result<String, TokenError> {
        if self.revoked.contains(token) {
            return Err(TokenError::TokenRevoked);
        }
        self.codec.verify(token).map(|claims| claims.sub)
    }
}
