//! Stateless minting and verification of signed session tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::entities::session::{SessionClaims, SESSION_ISSUER};
use crate::errors::TokenError;

/// Length of the generated HMAC secret in bytes
const SECRET_LEN: usize = 32;

/// Signs and verifies session tokens (JWT, HS256)
///
/// The secret is drawn from the OS CSPRNG when the codec is built and never
/// leaves this struct. Tokens minted by one codec are unverifiable by any
/// other, so every outstanding token dies with the process.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec with a fresh random 256-bit secret
    pub fn new() -> Self {
        let mut secret = [0u8; SECRET_LEN];
        OsRng.fill_bytes(&mut secret);
        Self::from_secret(&secret)
    }

    pub(crate) fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_issuer(&[SESSION_ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mints a token for `subject` that expires `expiry_secs` from now
    pub fn mint(&self, subject: &str, expiry_secs: u64) -> Result<String, TokenError> {
        let claims = SessionClaims::new(subject, expiry_secs);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Verifies signature, issuer and expiry, returning the embedded claims
    ///
    /// Never panics; malformed input is reported as `InvalidTokenFormat`.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            },
        )?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::InvalidTokenFormat);
        }

        Ok(data.claims)
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
