//! Integration tests for the login, guest, registration, and `me` endpoints.

use axum::http::StatusCode;
use serde_json::json;

use forum_database::{LookupField, PrincipalStore};
use forum_entity::principal::{PrincipalKind, PrincipalStatus};

use crate::helpers::TestApp;

async fn login_email(app: &TestApp, email: &str, password: &str) -> crate::helpers::TestResponse {
    app.request(
        "POST",
        "/api/auth/login",
        Some(json!({ "email": email, "password": password })),
        None,
    )
    .await
}

#[tokio::test]
async fn test_each_kind_logs_in_as_itself() {
    let app = TestApp::new();
    app.seed(PrincipalKind::Admin, "root", "root@site.com", "s3cret!").await;
    app.seed(PrincipalKind::Moderator, "mod", "mod@site.com", "s3cret!").await;
    app.seed(PrincipalKind::User, "bob", "bob@site.com", "s3cret!").await;

    for (email, kind) in [
        ("root@site.com", "admin"),
        ("mod@site.com", "moderator"),
        ("bob@site.com", "user"),
    ] {
        let response = login_email(&app, email, "s3cret!").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["data"]["principal"]["kind"], kind);
        assert_eq!(response.body["data"]["token_type"], "Bearer");
    }
}

#[tokio::test]
async fn test_wrong_secret_for_admin_is_generic() {
    let app = TestApp::new();
    app.seed(PrincipalKind::Admin, "root", "admin@site.com", "right-pass").await;

    let response = login_email(&app, "admin@site.com", "wrong-pass").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_credentials");
    assert_eq!(response.body["message"], "Invalid email or password.");
}

#[tokio::test]
async fn test_unknown_email_matches_wrong_secret_response() {
    let app = TestApp::new();

    let response = login_email(&app, "ghost@site.com", "whatever").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_credentials");
    assert_eq!(response.body["message"], "Invalid email or password.");
}

#[tokio::test]
async fn test_empty_fields_are_bad_request() {
    let app = TestApp::new();

    let response = login_email(&app, "", "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_banned_member_by_username() {
    let app = TestApp::new();
    let id = app.seed(PrincipalKind::User, "bob", "bob@site.com", "hunter22").await;
    app.set_status(PrincipalKind::User, id, PrincipalStatus::Banned).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login/username",
            Some(json!({ "username": "bob", "password": "hunter22" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "account_banned");
    assert_ne!(response.body["message"], "Invalid username or password.");
}

#[tokio::test]
async fn test_inactive_account() {
    let app = TestApp::new();
    let id = app.seed(PrincipalKind::Moderator, "mod", "mod@site.com", "hunter22").await;
    app.set_status(PrincipalKind::Moderator, id, PrincipalStatus::Inactive).await;

    let response = login_email(&app, "mod@site.com", "hunter22").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "account_inactive");
}

#[tokio::test]
async fn test_shared_email_resolves_to_admin() {
    let app = TestApp::new();
    app.seed(PrincipalKind::User, "jo", "jo@site.com", "member-pass").await;
    app.seed(PrincipalKind::Admin, "jo-admin", "jo@site.com", "admin-pass").await;

    for _ in 0..3 {
        let response = login_email(&app, "jo@site.com", "admin-pass").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["principal"]["kind"], "admin");
    }

    let response = login_email(&app, "jo@site.com", "member-pass").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_legacy_plaintext_is_upgraded_on_login() {
    let app = TestApp::new();
    let id = app
        .seed_raw(PrincipalKind::User, "old", "old@site.com", "legacy-pass")
        .await;

    app.login("old@site.com", "legacy-pass").await;

    let row = app
        .principals
        .find_by_id_and_kind(PrincipalKind::User, id)
        .await
        .unwrap()
        .unwrap();
    assert!(row.secret.starts_with("$argon2id$"));

    app.login("old@site.com", "legacy-pass").await;
}

#[tokio::test]
async fn test_register_then_login_and_me() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "newbie", "email": "newbie@site.com", "password": "fresh-pass" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["kind"], "user");
    assert!(response.body["data"].get("secret").is_none());

    let token = app.login("NEWBIE@site.com", "fresh-pass").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["display_name"], "newbie");
    assert_eq!(me.body["data"]["role"], "user");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    let body = json!({ "username": "dup", "email": "dup@site.com", "password": "fresh-pass" });

    let first = app.request("POST", "/api/auth/register", Some(body.clone()), None).await;
    let second = app.request("POST", "/api/auth/register", Some(body), None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_short_password_rejected_at_registration() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "tiny", "email": "tiny@site.com", "password": "abc" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        app.principals
            .find_by_identifier(PrincipalKind::User, LookupField::Username, "tiny")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_guest_admission_and_me() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/guest", Some(json!({ "username": " visitor " })), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["principal"]["kind"], "guest");
    assert_eq!(response.body["data"]["principal"]["display_name"], "visitor");

    let token = response.body["data"]["access_token"].as_str().unwrap().to_string();
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["role"], "guest");
}

#[tokio::test]
async fn test_blank_guest_name_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/guest", Some(json!({ "username": "   " })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    let garbage = app.request("GET", "/api/auth/me", None, Some("not.a.jwt")).await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "in_memory");
}
