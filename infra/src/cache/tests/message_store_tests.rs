//! Unit tests for the Redis message store encoding

use std::collections::HashMap;

use crate::cache::RedisMessageStore;

fn fields(user_id: &str, message: &str, sent_at: &str) -> HashMap<String, String> {
    HashMap::from([
        ("user_id".to_string(), user_id.to_string()),
        ("message".to_string(), message.to_string()),
        ("sent_at".to_string(), sent_at.to_string()),
    ])
}

#[test]
fn test_key_and_pattern() {
    assert_eq!(RedisMessageStore::key("c1", "m1"), "chat:c1:m1");
    assert_eq!(RedisMessageStore::pattern("c1"), "chat:c1:*");
    assert_eq!(RedisMessageStore::pattern("c*"), "chat:c\\*:*");
}

#[test]
fn test_decode_valid_entry() {
    let message = RedisMessageStore::decode(
        "c1",
        "chat:c1:m1",
        &fields("alice", "hello", "2024-05-01T10:00:00+00:00"),
    )
    .unwrap();

    assert_eq!(message.message_id, "m1");
    assert_eq!(message.chat_id, "c1");
    assert_eq!(message.user_id, "alice");
    assert_eq!(message.message, "hello");
    assert_eq!(message.sent_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
}

#[test]
fn test_decode_rejects_partial_or_foreign_entries() {
    let good = fields("alice", "hello", "2024-05-01T10:00:00+00:00");

    // Another chat's key
    assert!(RedisMessageStore::decode("c1", "chat:c2:m1", &good).is_none());
    // Nested key below the chat
    assert!(RedisMessageStore::decode("c1", "chat:c1:m1:extra", &good).is_none());

    let mut missing = good.clone();
    missing.remove("message");
    assert!(RedisMessageStore::decode("c1", "chat:c1:m1", &missing).is_none());

    let bad_time = fields("alice", "hello", "yesterday");
    assert!(RedisMessageStore::decode("c1", "chat:c1:m1", &bad_time).is_none());
}
