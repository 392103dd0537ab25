//! Route definitions for the Compass web server

use crate::auth::{require_role, PortalGate};
use crate::{handlers, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use compass_core::Role;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/session", get(handlers::session))
        .route("/auth/demo-accounts", get(handlers::demo_accounts))
        // Sidebar
        .route("/navigation", get(handlers::navigation))
}

/// Public pages: the login form and the root redirect
pub fn page_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root_redirect))
        .route(state.login_path(), get(handlers::login_page))
}

/// One gated subtree per role. The gate runs before the page name is looked
/// at, so an unknown page in someone else's portal still redirects.
pub fn portal_routes(state: &AppState) -> Router<AppState> {
    Role::ALL.into_iter().fold(Router::new(), |router, role| {
        let gate = PortalGate {
            state: state.clone(),
            role,
        };

        let portal = Router::new()
            .route("/", get(handlers::portal_page))
            .route("/{*page}", get(handlers::portal_page))
            .route_layer(middleware::from_fn_with_state(gate, require_role));

        router.nest(&role.portal_prefix(), portal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use compass_access::CompassApplication;
    use compass_core::CompassConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check_route() {
        let state =
            AppState::with_application(CompassConfig::default(), CompassApplication::demo());
        let app = api_routes().with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
