//! Tests for session token handling

mod codec_tests;
mod revocation_tests;
