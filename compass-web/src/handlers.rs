//! HTTP request handlers for the Compass web server

use crate::auth::{LoginRejection, SignedIn};
use crate::templates::{self, LoginTemplate};
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    Json as JsonExtractor,
};
use compass_access::{LoginRequest, MenuItem, PortalPage, RouteMatch};
use compass_core::{Account, DemoCredential, Role};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: String,
}

/// Login form body. A field that is missing, `null` or not a string counts
/// as not filled in.
#[derive(Debug, Default, Deserialize)]
pub struct LoginBody {
    #[serde(default, deserialize_with = "form_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "form_field")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "form_field")]
    pub role: Option<String>,
}

fn form_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Some(value),
        other => {
            if !other.is_null() {
                debug!(value = %other, "Ignoring non-string form field");
            }
            None
        }
    })
}

impl LoginBody {
    /// An unrecognized role counts as no selection
    fn into_request(self) -> LoginRequest {
        let role = self.role.and_then(|role| match role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                if !role.trim().is_empty() {
                    debug!(error = %e, "Ignoring unrecognized role");
                }
                None
            }
        });

        LoginRequest {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            role,
        }
    }
}

/// Successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub user: Account,
    /// Landing page for the account's role
    pub redirect_to: String,
}

/// Session state as seen by clients
#[derive(Serialize)]
pub struct SessionResponse {
    pub state: &'static str,
    pub user: Option<Account>,
    pub is_loading: bool,
    pub authenticated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Sidebar for the current session
#[derive(Serialize)]
pub struct NavigationResponse {
    pub role: Option<Role>,
    pub items: Vec<MenuItem>,
}

/// A rendered portal page
#[derive(Serialize)]
pub struct PortalPageResponse {
    pub page: PortalPage,
    pub path: String,
    pub user: Account,
    pub menu: Vec<MenuItem>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `/` always sends the visitor to the login page
pub async fn root_redirect(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(state.login_path())
}

pub async fn login(
    State(state): State<AppState>,
    JsonExtractor(body): JsonExtractor<LoginBody>,
) -> Result<Json<LoginResponse>, LoginRejection> {
    let request = body.into_request();
    let account = state.application.login(&request).await?;

    info!(account = %account.id, role = %account.role, "Signed in over HTTP");
    Ok(Json(LoginResponse {
        redirect_to: state.application.landing_path(account.role),
        user: Account::clone(&account),
    }))
}

pub async fn logout(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.application.logout().await;
    Json(serde_json::json!({ "state": "anonymous" }))
}

pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    let snapshot = state.application.snapshot().await;

    Json(SessionResponse {
        state: snapshot.state_name(),
        user: snapshot.session.account().map(|account| Account::clone(account)),
        is_loading: snapshot.is_loading,
        authenticated_at: snapshot.authenticated_at,
    })
}

pub async fn navigation(State(state): State<AppState>) -> Json<NavigationResponse> {
    let role = state
        .application
        .session_store()
        .current_session()
        .await
        .role();

    Json(NavigationResponse {
        role,
        items: state.application.routes().menu(role),
    })
}

pub async fn demo_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<DemoCredential>>, StatusCode> {
    if !state.config.auth.show_demo_credentials {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(state.application.demo_credentials()))
}

/// Portal page. Runs behind the portal gate, so the session's role owns the
/// portal and only the page name is left to check.
pub async fn portal_page(
    State(state): State<AppState>,
    SignedIn(account): SignedIn,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let routes = state.application.routes();

    match routes.resolve(uri.path()) {
        RouteMatch::Portal {
            role,
            page: Some(page),
        } if role == account.role => Json(PortalPageResponse {
            path: page.path(),
            page: page.clone(),
            menu: routes.menu(Some(role)),
            user: Account::clone(&account),
        })
        .into_response(),
        _ => not_found(OriginalUri(uri)).await.into_response(),
    }
}

/// Anything without a route
pub async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "not_found",
            "path": uri.path(),
        })),
    )
}

/// Login page with the role selector, the form, and the demo account hint
pub async fn login_page(State(state): State<AppState>) -> Response {
    let credentials = if state.config.auth.show_demo_credentials {
        state.application.demo_credentials()
    } else {
        Vec::new()
    };

    templates::render(&LoginTemplate::new(credentials))
}
