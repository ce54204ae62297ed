//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(user_id: &str) -> User {
    User::new(
        user_id.to_string(),
        format!("{}@example.com", user_id),
        "Test User".to_string(),
        "hash".to_string(),
        "+61412345678".to_string(),
    )
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();

    let created = repo.create(user("alice")).await.unwrap();
    assert_eq!(created.user_id, "alice");

    let found = repo.find_by_user_id("alice").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(repo.exists_by_user_id("alice").await.unwrap());
    assert!(!repo.exists_by_user_id("bob").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_duplicate_user_id() {
    let repo = MockUserRepository::new();

    repo.create(user("alice")).await.unwrap();
    let result = repo.create(user("alice")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert_eq!(repo.len().await, 1);
}
