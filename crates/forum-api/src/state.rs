//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Instant;

use forum_auth::{
    Authenticator, JwtDecoder, JwtEncoder, PasswordValidator, RbacEnforcer, VerifierRegistry,
};
use forum_core::config::AppConfig;
use forum_database::{DatabasePool, GuestStore, PostStore, PrincipalStore};
use forum_service::{AdminPrincipalService, LoginService, PostService, RegistrationService};

/// Application state shared across all request handlers.
///
/// Every field is an `Arc` so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Principal store, used directly by `/auth/me`.
    pub principals: Arc<dyn PrincipalStore>,
    /// Login and guest admission.
    pub login_service: Arc<LoginService>,
    /// Member registration and admin creation.
    pub registration_service: Arc<RegistrationService>,
    /// Principal administration.
    pub admin_service: Arc<AdminPrincipalService>,
    /// Posts.
    pub post_service: Arc<PostService>,
    /// Access token validation.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Role checks for route guards.
    pub rbac: Arc<RbacEnforcer>,
    /// Connection pool, absent when running on in-memory stores.
    pub database: Option<DatabasePool>,
    /// Process start, for the health endpoint.
    pub started_at: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("database", &self.database.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire every service on top of the given stores.
    pub fn new(
        config: Arc<AppConfig>,
        principals: Arc<dyn PrincipalStore>,
        guests: Arc<dyn GuestStore>,
        posts: Arc<dyn PostStore>,
    ) -> Self {
        let auth = &config.auth;

        let verifiers = Arc::new(VerifierRegistry::from_config(&auth.verifiers));
        let validator = Arc::new(PasswordValidator::new(auth));
        let rbac = Arc::new(RbacEnforcer::new());
        let encoder = Arc::new(JwtEncoder::new(auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(auth));

        let authenticator = Arc::new(Authenticator::new(
            Arc::clone(&principals),
            verifiers.as_ref().clone(),
        ));

        let login_service = Arc::new(LoginService::new(
            authenticator,
            Arc::clone(&principals),
            guests,
            encoder,
            auth.rehash_on_login,
        ));
        let registration_service = Arc::new(RegistrationService::new(
            Arc::clone(&principals),
            Arc::clone(&verifiers),
            Arc::clone(&validator),
            Arc::clone(&rbac),
        ));
        let admin_service = Arc::new(AdminPrincipalService::new(
            Arc::clone(&principals),
            verifiers,
            validator,
            Arc::clone(&rbac),
        ));
        let post_service = Arc::new(PostService::new(posts));

        Self {
            config,
            principals,
            login_service,
            registration_service,
            admin_service,
            post_service,
            jwt_decoder,
            rbac,
            database: None,
            started_at: Instant::now(),
        }
    }

    /// Attach the connection pool so health checks can probe it.
    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}
