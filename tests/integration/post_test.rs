//! Integration tests for post authorship.

use axum::http::StatusCode;
use serde_json::json;

use forum_entity::principal::{PrincipalKind, PrincipalStatus};

use crate::helpers::TestApp;

async fn guest_token(app: &TestApp) -> String {
    let response = app
        .request("POST", "/api/auth/guest", Some(json!({ "username": "lurker" })), None)
        .await;
    response.body["data"]["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_member_and_moderator_author_posts() {
    let app = TestApp::new();
    app.seed(PrincipalKind::User, "bob", "bob@site.com", "bob-pass").await;
    app.seed(PrincipalKind::Moderator, "mod", "mod@site.com", "mod-pass").await;

    for (email, password, kind) in [
        ("bob@site.com", "bob-pass", "user"),
        ("mod@site.com", "mod-pass", "moderator"),
    ] {
        let token = app.login(email, password).await;
        let response = app
            .request(
                "POST",
                "/api/posts",
                Some(json!({ "thread_id": 7, "content": "hello" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["author"]["kind"], kind);
        assert_eq!(response.body["data"]["thread_id"], 7);
    }
}

#[tokio::test]
async fn test_admin_and_guest_cannot_author() {
    let app = TestApp::new();
    app.seed(PrincipalKind::Admin, "root", "root@site.com", "admin-pass").await;
    let admin = app.login("root@site.com", "admin-pass").await;
    let guest = guest_token(&app).await;

    for token in [admin, guest] {
        let response = app
            .request(
                "POST",
                "/api/posts",
                Some(json!({ "thread_id": 1, "content": "hi" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_blank_content_rejected() {
    let app = TestApp::new();
    app.seed(PrincipalKind::User, "bob", "bob@site.com", "bob-pass").await;
    let token = app.login("bob@site.com", "bob-pass").await;

    for content in ["", "   "] {
        let response = app
            .request(
                "POST",
                "/api/posts",
                Some(json!({ "thread_id": 1, "content": content })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_get_post() {
    let app = TestApp::new();
    app.seed(PrincipalKind::User, "bob", "bob@site.com", "bob-pass").await;
    let token = app.login("bob@site.com", "bob-pass").await;

    let created = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({ "thread_id": 3, "content": "first" })),
            Some(&token),
        )
        .await;
    let id = created.body["data"]["id"].as_i64().unwrap();

    let found = app.request("GET", &format!("/api/posts/{id}"), None, None).await;
    let missing = app.request("GET", "/api/posts/9999", None, None).await;

    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["content"], "first");
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_posting_requires_token() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/posts", Some(json!({ "thread_id": 1, "content": "x" })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_banned_member_token_cannot_post() {
    let app = TestApp::new();
    let bob = app.seed(PrincipalKind::User, "bob", "bob@site.com", "bob-pass").await;
    let token = app.login("bob@site.com", "bob-pass").await;
    app.set_status(PrincipalKind::User, bob, PrincipalStatus::Banned).await;

    let response = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({ "thread_id": 1, "content": "still here" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
