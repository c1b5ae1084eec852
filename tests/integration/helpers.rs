//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use forum_api::AppState;
use forum_auth::PasswordHasher;
use forum_core::config::AppConfig;
use forum_core::types::PrincipalId;
use forum_database::PrincipalStore;
use forum_database::memory::{MemoryGuestStore, MemoryPostStore, MemoryPrincipalStore};
use forum_entity::principal::{CreatePrincipal, PrincipalKind, PrincipalStatus};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Principal store for seeding and inspecting rows
    pub principals: Arc<MemoryPrincipalStore>,
}

/// Status and parsed JSON body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application on empty in-memory stores.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-signing-key-0123456789".to_string();

        let principals = Arc::new(MemoryPrincipalStore::new());
        let state = AppState::new(
            Arc::new(config),
            principals.clone(),
            Arc::new(MemoryGuestStore::new()),
            Arc::new(MemoryPostStore::with_principals(principals.clone())),
        );

        Self {
            router: forum_api::build_app(state),
            principals,
        }
    }

    /// Insert a row whose stored secret is taken verbatim.
    pub async fn seed_raw(
        &self,
        kind: PrincipalKind,
        username: &str,
        email: &str,
        stored_secret: &str,
    ) -> PrincipalId {
        self.principals
            .create(&CreatePrincipal {
                kind,
                username: username.to_string(),
                email: email.to_string(),
                secret: stored_secret.to_string(),
                role: None,
                created_by: None,
            })
            .await
            .expect("seed principal")
            .id
    }

    /// Insert a row with an Argon2id-hashed secret.
    pub async fn seed(
        &self,
        kind: PrincipalKind,
        username: &str,
        email: &str,
        password: &str,
    ) -> PrincipalId {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("hash password");
        self.seed_raw(kind, username, email, &hash).await
    }

    /// Force a row's status, bypassing the transition rules.
    pub async fn set_status(&self, kind: PrincipalKind, id: PrincipalId, status: PrincipalStatus) {
        self.principals
            .update_status(kind, id, status)
            .await
            .expect("set status");
    }

    /// Send a request and parse the JSON response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Log in by email and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }
}
