//! Authentication and role gating for the HTTP shell

use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
};
use compass_access::{decide, AuthError, GuardDecision, Session};
use compass_core::{Account, Role};
use std::sync::Arc;
use tracing::{debug, warn};

/// Redirect sent when the session may not see a portal
#[derive(Debug)]
pub struct AuthRedirect(pub String);

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary(&self.0).into_response()
    }
}

/// A failed login, rendered as a JSON error body
#[derive(Debug)]
pub struct LoginRejection(pub AuthError);

impl LoginRejection {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::Superseded => StatusCode::CONFLICT,
            AuthError::NotFound { .. }
            | AuthError::RoleMismatch { .. }
            | AuthError::PasswordRejected { .. } => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthError> for LoginRejection {
    fn from(error: AuthError) -> Self {
        Self(error)
    }
}

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "error": self.0.code(),
            "message": self.0.user_message(),
        });
        if let AuthError::MissingField(field) = &self.0 {
            body["field"] = serde_json::json!(field);
        }

        (self.status(), Json(body)).into_response()
    }
}

/// Middleware state for one portal subtree
#[derive(Clone)]
pub struct PortalGate {
    pub state: AppState,
    pub role: Role,
}

/// Let the request through only when the session's role owns this portal.
///
/// On success the signed-in account is stored in the request extensions so
/// the handler renders for the identity that was checked.
pub async fn require_role(
    State(gate): State<PortalGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = gate
        .state
        .application
        .session_store()
        .current_session()
        .await;

    match (decide(&session, gate.role, gate.state.login_path()), session) {
        (GuardDecision::Allow, Session::Authenticated(account)) => {
            request.extensions_mut().insert(account);
            next.run(request).await
        }
        (GuardDecision::Redirect(target), session) => {
            debug!(
                path = %request.uri().path(),
                required = %gate.role,
                session = %session.summary(),
                "Portal request redirected"
            );
            AuthRedirect(target).into_response()
        }
        (GuardDecision::Allow, Session::Anonymous) => {
            warn!("Guard allowed an anonymous session");
            AuthRedirect(gate.state.login_path().to_string()).into_response()
        }
    }
}

/// The signed-in account
pub struct SignedIn(pub Arc<Account>);

impl<S> FromRequestParts<S> for SignedIn
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Set by the portal gate
        if let Some(account) = parts.extensions.get::<Arc<Account>>() {
            return Ok(SignedIn(Arc::clone(account)));
        }

        let app_state = AppState::from_ref(state);
        match app_state
            .application
            .session_store()
            .current_session()
            .await
        {
            Session::Authenticated(account) => Ok(SignedIn(account)),
            Session::Anonymous => Err(AuthRedirect(app_state.login_path().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_access::LoginField;

    #[test]
    fn test_rejection_status_codes() {
        let cases = [
            (
                AuthError::MissingField(LoginField::Email),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::NotFound {
                    email: "a@b.c".to_string(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                AuthError::RoleMismatch {
                    email: "a@b.c".to_string(),
                    submitted: Role::Admin,
                },
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::Superseded, StatusCode::CONFLICT),
        ];

        for (error, status) in cases {
            assert_eq!(LoginRejection(error).status(), status);
        }
    }

    #[test]
    fn test_redirect_is_temporary() {
        let response = AuthRedirect("/login".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/login");
    }
}
