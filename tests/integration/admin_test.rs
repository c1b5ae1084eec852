//! Integration tests for principal administration.

use axum::http::StatusCode;
use serde_json::json;

use forum_entity::principal::PrincipalKind;

use crate::helpers::TestApp;

struct Staff {
    app: TestApp,
    admin: String,
    moderator: String,
    member: String,
    moderator_id: i64,
    member_id: i64,
}

async fn staff() -> Staff {
    let app = TestApp::new();
    app.seed(PrincipalKind::Admin, "root", "root@site.com", "admin-pass").await;
    let moderator_id = app
        .seed(PrincipalKind::Moderator, "mod", "mod@site.com", "mod-pass")
        .await
        .get();
    let member_id = app
        .seed(PrincipalKind::User, "bob", "bob@site.com", "bob-pass")
        .await
        .get();

    let admin = app.login("root@site.com", "admin-pass").await;
    let moderator = app.login("mod@site.com", "mod-pass").await;
    let member = app.login("bob@site.com", "bob-pass").await;

    Staff {
        app,
        admin,
        moderator,
        member,
        moderator_id,
        member_id,
    }
}

#[tokio::test]
async fn test_admin_lists_every_kind() {
    let s = staff().await;

    for kind in ["admin", "moderator", "user"] {
        let response = s
            .app
            .request("GET", &format!("/api/admin/principals/{kind}"), None, Some(&s.admin))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_member_cannot_reach_admin_routes() {
    let s = staff().await;

    let response = s
        .app
        .request("GET", "/api/admin/principals/user", None, Some(&s.member))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_moderator_reads_members_only() {
    let s = staff().await;

    let members = s
        .app
        .request("GET", "/api/admin/principals/user", None, Some(&s.moderator))
        .await;
    let admins = s
        .app
        .request("GET", "/api/admin/principals/admin", None, Some(&s.moderator))
        .await;

    assert_eq!(members.status, StatusCode::OK);
    assert_eq!(admins.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_moderator_bans_member_and_login_reports_ban() {
    let s = staff().await;

    let response = s
        .app
        .request(
            "PUT",
            &format!("/api/admin/principals/user/{}/status", s.member_id),
            Some(json!({ "status": "banned" })),
            Some(&s.moderator),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "banned");

    let login = s
        .app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "bob@site.com", "password": "bob-pass" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.body["error"], "account_banned");
}

#[tokio::test]
async fn test_moderator_cannot_ban_staff() {
    let s = staff().await;

    let response = s
        .app
        .request(
            "PUT",
            "/api/admin/principals/admin/1/status",
            Some(json!({ "status": "banned" })),
            Some(&s.moderator),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_transition_rejected() {
    let s = staff().await;
    let uri = format!("/api/admin/principals/user/{}/status", s.member_id);

    let banned = s
        .app
        .request("PUT", &uri, Some(json!({ "status": "ban" })), Some(&s.admin))
        .await;
    let to_inactive = s
        .app
        .request("PUT", &uri, Some(json!({ "status": "inactive" })), Some(&s.admin))
        .await;

    assert_eq!(banned.status, StatusCode::OK);
    assert_eq!(to_inactive.status, StatusCode::BAD_REQUEST);
    assert_eq!(to_inactive.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_creates_moderator_who_can_log_in() {
    let s = staff().await;

    let response = s
        .app
        .request(
            "POST",
            "/api/admin/principals",
            Some(json!({
                "kind": "moderator",
                "username": "helper",
                "email": "helper@site.com",
                "password": "helper-pass",
            })),
            Some(&s.admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["kind"], "moderator");
    assert_eq!(response.body["data"]["created_by"], 1);

    s.app.login("helper@site.com", "helper-pass").await;
}

#[tokio::test]
async fn test_moderator_cannot_create_principals() {
    let s = staff().await;

    let response = s
        .app
        .request(
            "POST",
            "/api/admin/principals",
            Some(json!({
                "kind": "user",
                "username": "sock",
                "email": "sock@site.com",
                "password": "sock-pass",
            })),
            Some(&s.moderator),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let s = staff().await;

    let response = s
        .app
        .request("DELETE", "/api/admin/principals/admin/1", None, Some(&s.admin))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_member() {
    let s = staff().await;
    let uri = format!("/api/admin/principals/user/{}", s.member_id);

    let deleted = s.app.request("DELETE", &uri, None, Some(&s.admin)).await;
    let again = s.app.request("GET", &uri, None, Some(&s.admin)).await;

    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_change_applies_to_members() {
    let s = staff().await;

    let response = s
        .app
        .request(
            "PUT",
            &format!("/api/admin/principals/user/{}/role", s.member_id),
            Some(json!({ "role": "moderator" })),
            Some(&s.admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "moderator");

    let cleared = s
        .app
        .request(
            "PUT",
            &format!("/api/admin/principals/user/{}/role", s.member_id),
            Some(json!({ "role": null })),
            Some(&s.admin),
        )
        .await;
    assert_eq!(cleared.body["data"]["role"], "user");
}

#[tokio::test]
async fn test_reset_secret() {
    let s = staff().await;

    let response = s
        .app
        .request(
            "PUT",
            &format!("/api/admin/principals/user/{}/secret", s.member_id),
            Some(json!({ "password": "replaced-pass" })),
            Some(&s.admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    s.app.login("bob@site.com", "replaced-pass").await;
}

#[tokio::test]
async fn test_unknown_kind_in_path() {
    let s = staff().await;

    let response = s
        .app
        .request("GET", "/api/admin/principals/wizard", None, Some(&s.admin))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_banned_moderator_token_is_revoked() {
    let s = staff().await;

    let banned = s
        .app
        .request(
            "PUT",
            &format!("/api/admin/principals/moderator/{}/status", s.moderator_id),
            Some(json!({ "status": "banned" })),
            Some(&s.admin),
        )
        .await;
    assert_eq!(banned.status, StatusCode::OK);

    let response = s
        .app
        .request(
            "PUT",
            &format!("/api/admin/principals/user/{}/status", s.member_id),
            Some(json!({ "status": "banned" })),
            Some(&s.moderator),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let member = s
        .app
        .request("GET", &format!("/api/admin/principals/user/{}", s.member_id), None, Some(&s.admin))
        .await;
    assert_eq!(member.body["data"]["status"], "active");
}

#[tokio::test]
async fn test_deleted_principal_token_is_revoked() {
    let s = staff().await;

    let deleted = s
        .app
        .request(
            "DELETE",
            &format!("/api/admin/principals/moderator/{}", s.moderator_id),
            None,
            Some(&s.admin),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = s
        .app
        .request("GET", "/api/admin/principals/user", None, Some(&s.moderator))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let me = s.app.request("GET", "/api/auth/me", None, Some(&s.moderator)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_change_reaches_existing_token() {
    let s = staff().await;

    let before = s
        .app
        .request("GET", "/api/admin/principals/user", None, Some(&s.member))
        .await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    s.app
        .request(
            "PUT",
            &format!("/api/admin/principals/user/{}/role", s.member_id),
            Some(json!({ "role": "moderator" })),
            Some(&s.admin),
        )
        .await;

    let after = s
        .app
        .request("GET", "/api/admin/principals/user", None, Some(&s.member))
        .await;
    assert_eq!(after.status, StatusCode::OK);
}
