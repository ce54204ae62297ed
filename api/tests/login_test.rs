//! Integration tests for POST /api/v1/auth/login

mod common;

use actix_web::{http::StatusCode, test};
use bc_api::create_app;
use common::{TestContext, PASSWORD};

#[actix_web::test]
async fn test_login_issues_bearer_token() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "user_id": "alice", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 1800);

    let token = body["token"].as_str().unwrap_or_default();
    assert!(ctx.state.session_manager.validate_token(token));
    assert_eq!(
        ctx.state.session_manager.get_token("alice").await.as_deref(),
        Some(token)
    );
}

#[actix_web::test]
async fn test_login_wrong_password_and_unknown_user_look_alike() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let wrong_password = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "user_id": "alice", "password": "wrong password" }))
        .to_request();
    let resp = test::call_service(&app, wrong_password).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let first: serde_json::Value = test::read_body_json(resp).await;

    let unknown_user = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "user_id": "mallory", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, unknown_user).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let second: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(first["error"], "LOGIN_FAILED");
    assert_eq!(first["error"], second["error"]);
    assert_eq!(first["message"], second["message"]);
}

#[actix_web::test]
async fn test_login_empty_fields_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "user_id": "", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("user_id").is_some());
}

#[actix_web::test]
async fn test_login_store_failure_is_server_error() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    ctx.sessions.fail_writes(true);
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "user_id": "alice", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ctx.sessions.len().await, 0);
}

#[actix_web::test]
async fn test_second_login_supersedes_first() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;

    let first = ctx.token_for("alice").await;
    let second = ctx.token_for("alice").await;

    assert_ne!(first, second);
    assert!(!ctx.state.session_manager.validate_token(&first));
    assert!(ctx.state.session_manager.validate_token(&second));
}
