//! Unit tests for the Redis session store

use crate::cache::RedisSessionStore;

#[test]
fn test_session_keys_are_namespaced() {
    assert_eq!(RedisSessionStore::key("alice"), "access_token:alice");
    assert_ne!(RedisSessionStore::key("alice"), "alice");
}
