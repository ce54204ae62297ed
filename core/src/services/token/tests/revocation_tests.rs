//! Unit tests for the revocation cache

use std::sync::Arc;
use std::thread;

use crate::services::token::RevocationCache;

#[test]
fn test_add_and_contains() {
    let cache = RevocationCache::new(3);
    assert!(cache.is_empty());

    cache.add("t1");
    assert!(cache.contains("t1"));
    assert!(!cache.contains("t2"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_fifo_eviction_at_capacity() {
    let cache = RevocationCache::new(2);

    cache.add("t1");
    cache.add("t2");
    cache.add("t3");

    assert_eq!(cache.len(), 2);
    assert!(!cache.contains("t1"));
    assert!(cache.contains("t2"));
    assert!(cache.contains("t3"));
}

#[test]
fn test_lookup_does_not_refresh_position() {
    let cache = RevocationCache::new(2);

    cache.add("t1");
    cache.add("t2");
    assert!(cache.contains("t1"));
    cache.add("t3");

    assert!(!cache.contains("t1"));
}

#[test]
fn test_duplicate_add_is_ignored() {
    let cache = RevocationCache::new(2);

    cache.add("t1");
    cache.add("t1");
    cache.add("t2");

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("t1"));
}

#[test]
fn test_zero_capacity_stores_nothing() {
    let cache = RevocationCache::new(0);
    cache.add("t1");

    assert!(cache.is_empty());
    assert!(!cache.contains("t1"));
}

#[test]
fn test_concurrent_adds_stay_bounded() {
    let cache = Arc::new(RevocationCache::new(50));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500 {
                    cache.add(&format!("w{worker}-t{i}"));
                    assert!(cache.len() <= 50);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 50);
    assert_eq!(cache.capacity(), 50);
}
