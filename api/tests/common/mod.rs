//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use bc_api::AppState;
use bc_core::repositories::{
    MockChatRepository, MockMessageStore, MockSessionStore, MockUserRepository,
};
use bc_core::services::{AuthServiceConfig, RegisterUser, SessionManager};
use bc_shared::{AppConfig, SessionConfig};

pub const PASSWORD: &str = "correct horse";

pub type TestState =
    AppState<MockUserRepository, MockChatRepository, MockMessageStore, MockSessionStore>;

/// App state plus handles onto the in-memory stores behind it
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub config: AppConfig,
    pub users: MockUserRepository,
    pub sessions: MockSessionStore,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_session(SessionConfig::default())
    }

    pub fn with_session(session: SessionConfig) -> Self {
        let users = MockUserRepository::new();
        let sessions = MockSessionStore::new();

        let config = AppConfig {
            session: session.clone(),
            ..AppConfig::default()
        };

        let session_manager = Arc::new(SessionManager::new(sessions.clone(), session));
        let state = web::Data::new(AppState::new(
            Arc::new(users.clone()),
            Arc::new(MockChatRepository::new()),
            Arc::new(MockMessageStore::new()),
            session_manager,
            // Lowest bcrypt cost keeps the tests fast
            AuthServiceConfig { bcrypt_cost: 4 },
        ));

        Self {
            state,
            config,
            users,
            sessions,
        }
    }

    /// Register `user_id` straight through the service
    pub async fn seed_user(&self, user_id: &str) {
        self.state
            .auth_service
            .register(registration(user_id))
            .await
            .expect("seed user");
    }

    /// Log `user_id` in through the service and return the bearer token
    pub async fn token_for(&self, user_id: &str) -> String {
        self.state
            .auth_service
            .login(user_id, PASSWORD)
            .await
            .expect("login")
            .token
    }
}

pub fn registration(user_id: &str) -> RegisterUser {
    RegisterUser {
        user_id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
        name: "Test User".to_string(),
        password: PASSWORD.to_string(),
        phone_number: "+14155550123".to_string(),
    }
}

pub fn register_body(user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "email": format!("{}@example.com", user_id),
        "name": "Test User",
        "password": PASSWORD,
        "phone_number": "+14155550123",
    })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
