//! Claims carried by a session bearer token.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped into, and required on, every session token
pub const SESSION_ISSUER: &str = "bchat";

// Upper bound on a configured lifetime (100 years)
const MAX_LIFETIME_SECS: i64 = 100 * 365 * 24 * 3600;

/// JWT payload of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (the user's public id)
    pub sub: String,

    /// Per-issuance nonce; two tokens minted in the same second still differ
    pub jti: String,

    /// Issued at (unix seconds)
    pub iat: i64,

    /// Expiration (unix seconds)
    pub exp: i64,

    pub iss: String,
}

impl SessionClaims {
    /// Fresh claims for `subject` expiring `expiry_secs` from now
    pub fn new(subject: &str, expiry_secs: u64) -> Self {
        let now = Utc::now();
        let secs = i64::try_from(expiry_secs)
            .unwrap_or(MAX_LIFETIME_SECS)
            .min(MAX_LIFETIME_SECS);
        let exp = now
            .checked_add_signed(Duration::seconds(secs))
            .unwrap_or(now);

        Self {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: SESSION_ISSUER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_issued_at_plus_lifetime() {
        let claims = SessionClaims::new("alice", 1800);
        assert_eq!(claims.exp - claims.iat, 1800);
        assert_eq!(claims.iss, SESSION_ISSUER);
    }

    #[test]
    fn test_nonce_differs_per_issuance() {
        let a = SessionClaims::new("alice", 60);
        let b = SessionClaims::new("alice", 60);
        assert_ne!(a.jti, b.jti);
    }
}
