//! Unit tests for the token codec

use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::entities::session::SessionClaims;
use crate::errors::TokenError;
use crate::services::token::TokenCodec;

#[test]
fn test_mint_then_verify_returns_subject() {
    let codec = TokenCodec::new();
    let token = codec.mint("alice", 60).unwrap();

    let claims = codec.verify(&token).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.exp - claims.iat, 60);
}

#[test]
fn test_tokens_for_same_subject_differ() {
    let codec = TokenCodec::new();
    let first = codec.mint("alice", 60).unwrap();
    let second = codec.mint("alice", 60).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_garbage_is_rejected_without_panicking() {
    let codec = TokenCodec::new();

    for input in ["", "not-a-real-token", "a.b.c", "....", "Bearer x", "\u{0}\u{1}"] {
        assert_eq!(codec.verify(input), Err(TokenError::InvalidTokenFormat), "{input:?}");
    }
}

#[test]
fn test_token_from_other_process_secret_is_rejected() {
    let ours = TokenCodec::from_secret(b"0123456789abcdef0123456789abcdef");
    let theirs = TokenCodec::from_secret(b"fedcba9876543210fedcba9876543210");

    let token = theirs.mint("alice", 60).unwrap();
    assert_eq!(ours.verify(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_tampered_payload_is_rejected() {
    let codec = TokenCodec::new();
    let token = codec.mint("alice", 60).unwrap();

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let other = codec.mint("mallory", 60).unwrap();
    parts[1] = other.split('.').nth(1).unwrap().to_string();
    let forged = parts.join(".");

    assert_eq!(codec.verify(&forged), Err(TokenError::InvalidSignature));
}

#[test]
fn test_expired_claims_are_rejected_with_zero_leeway() {
    let secret = b"0123456789abcdef0123456789abcdef";
    let codec = TokenCodec::from_secret(secret);

    let mut claims = SessionClaims::new("alice", 60);
    claims.iat -= 120;
    claims.exp = claims.iat + 60;
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap();

    assert_eq!(codec.verify(&token), Err(TokenError::TokenExpired));
}

#[test]
fn test_foreign_issuer_is_rejected() {
    let secret = b"0123456789abcdef0123456789abcdef";
    let codec = TokenCodec::from_secret(secret);

    let mut claims = SessionClaims::new("alice", 60);
    claims.iss = "someone-else".to_string();
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap();

    assert!(codec.verify(&token).is_err());
}

#[test]
fn test_empty_subject_is_rejected() {
    let codec = TokenCodec::new();
    let token = codec.mint("", 60).unwrap();

    assert_eq!(codec.verify(&token), Err(TokenError::InvalidTokenFormat));
}
