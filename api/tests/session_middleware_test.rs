//! Integration tests for the session middleware guarding /api/v1/chat

mod common;

use std::time::Duration;

use actix_web::{http::StatusCode, test};
use bc_api::create_app;
use bc_shared::SessionConfig;
use common::{bearer, TestContext};

#[actix_web::test]
async fn test_missing_or_malformed_header_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let no_header = test::TestRequest::get().uri("/api/v1/chat/list").to_request();
    let resp = test::call_service(&app, no_header).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let wrong_scheme = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(("Authorization", "Basic YWxpY2U6c2VjcmV0"))
        .to_request();
    let resp = test::call_service(&app, wrong_scheme).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let garbage = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer("not.a.token"))
        .to_request();
    let resp = test::call_service(&app, garbage).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_from_other_process_rejected() {
    // A second manager has its own signing secret
    let issuer = TestContext::new();
    issuer.seed_user("alice").await;
    let foreign = issuer.token_for("alice").await;

    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&foreign))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_superseded_token_rejected() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    let first = ctx.token_for("alice").await;
    let second = ctx.token_for("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&first))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&second))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_expired_token_rejected() {
    let ctx = TestContext::with_session(SessionConfig::default().with_expiry_seconds(1));
    ctx.seed_user("alice").await;
    let token = ctx.token_for("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(2100)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_evicted_token_only_rejected_in_strict_mode() {
    // A one-entry revocation cache forgets alice's old token as soon as
    // bobby's is revoked
    let lenient = SessionConfig::default().with_max_blacklist_size(1);
    let strict = SessionConfig {
        strict_single_session: true,
        ..lenient.clone()
    };

    for (session, expected) in [
        (lenient, StatusCode::OK),
        (strict, StatusCode::UNAUTHORIZED),
    ] {
        let ctx = TestContext::with_session(session);
        ctx.seed_user("alice").await;
        ctx.seed_user("bobby").await;

        let stale = ctx.token_for("alice").await;
        ctx.token_for("alice").await;
        ctx.token_for("bobby").await;
        ctx.token_for("bobby").await;
        assert_eq!(ctx.state.session_manager.revoked_count(), 1);

        let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
        let req = test::TestRequest::get()
            .uri("/api/v1/chat/list")
            .insert_header(bearer(&stale))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_web::test]
async fn test_public_routes_need_no_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
