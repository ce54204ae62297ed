//! Session token configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Token lifetime in seconds, also used as the store TTL
    pub expiry_duration_sec: u64,

    /// Capacity of the in-memory recently-revoked token set
    pub max_blacklist_size: usize,

    /// Require the presented token to be the subject's current store entry
    #[serde(default)]
    pub strict_single_session: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_duration_sec: 1800, // 30 minutes
            max_blacklist_size: 100,
            strict_single_session: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expiry_duration_sec: env_or("SESSION_EXPIRY_SECONDS", defaults.expiry_duration_sec),
            max_blacklist_size: env_or("SESSION_MAX_BLACKLIST_SIZE", defaults.max_blacklist_size),
            strict_single_session: env_or(
                "SESSION_STRICT_SINGLE_SESSION",
                defaults.strict_single_session,
            ),
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_expiry_seconds(mut self, seconds: u64) -> Self {
        self.expiry_duration_sec = seconds;
        self
    }

    /// Set the revocation cache capacity
    pub fn with_max_blacklist_size(mut self, size: usize) -> Self {
        self.max_blacklist_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.expiry_duration_sec, 1800);
        assert_eq!(config.max_blacklist_size, 100);
        assert!(!config.strict_single_session);
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::default()
            .with_expiry_seconds(5)
            .with_max_blacklist_size(3);

        assert_eq!(config.expiry_duration_sec, 5);
        assert_eq!(config.max_blacklist_size, 3);
    }
}
