//! Integration tests for the /api/v1/chat endpoints

mod common;

use actix_web::{http::StatusCode, test};
use bc_api::create_app;
use common::{bearer, TestContext};

#[actix_web::test]
async fn test_chat_round_trip() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    ctx.seed_user("bobby").await;
    let alice = ctx.token_for("alice").await;
    let bobby = ctx.token_for("bobby").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/create")
        .insert_header(bearer(&alice))
        .set_json(serde_json::json!({ "to_user_id": "bobby" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let chat_id = body["chat_id"].as_str().unwrap_or_default().to_string();
    assert!(!chat_id.is_empty());

    for (token, text) in [(&alice, "hi bobby"), (&bobby, "hello alice")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/chat/send")
            .insert_header(bearer(token))
            .set_json(serde_json::json!({ "chat_id": chat_id, "message": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message_id"].is_string());
        assert!(body["sent_at"].is_string());
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/get")
        .insert_header(bearer(&bobby))
        .set_json(serde_json::json!({ "chat_id": chat_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["user_id"], "alice");
    assert_eq!(messages[0]["message"], "hi bobby");
    assert_eq!(messages[1]["user_id"], "bobby");
    assert_eq!(messages[1]["chat_id"], chat_id.as_str());
    assert!(messages[1]["created_at"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["chat_ids"], serde_json::json!([chat_id]));
}

#[actix_web::test]
async fn test_create_chat_errors() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    ctx.seed_user("bobby").await;
    let alice = ctx.token_for("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let cases = [
        ("nobody", StatusCode::NOT_FOUND),
        ("alice", StatusCode::BAD_REQUEST),
        ("", StatusCode::BAD_REQUEST),
        ("bobby", StatusCode::OK),
        ("bobby", StatusCode::CONFLICT),
    ];

    for (target, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/chat/create")
            .insert_header(bearer(&alice))
            .set_json(serde_json::json!({ "to_user_id": target }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "target {:?}", target);
    }
}

#[actix_web::test]
async fn test_outsider_cannot_read_or_write() {
    let ctx = TestContext::new();
    for user in ["alice", "bobby", "carol"] {
        ctx.seed_user(user).await;
    }
    let chat_id = ctx
        .state
        .chat_service
        .create_chat("alice", "bobby")
        .await
        .expect("create chat");
    let carol = ctx.token_for("carol").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/send")
        .insert_header(bearer(&carol))
        .set_json(serde_json::json!({ "chat_id": chat_id, "message": "let me in" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/get")
        .insert_header(bearer(&carol))
        .set_json(serde_json::json!({ "chat_id": chat_id }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/list")
        .insert_header(bearer(&carol))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["chat_ids"], serde_json::json!([]));
}

#[actix_web::test]
async fn test_send_empty_message_rejected() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    ctx.seed_user("bobby").await;
    let chat_id = ctx
        .state
        .chat_service
        .create_chat("alice", "bobby")
        .await
        .expect("create chat");
    let alice = ctx.token_for("alice").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    for message in ["", "   "] {
        let req = test::TestRequest::post()
            .uri("/api/v1/chat/send")
            .insert_header(bearer(&alice))
            .set_json(serde_json::json!({ "chat_id": chat_id, "message": message }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
