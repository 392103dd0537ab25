//! Login decision and session population

use super::credentials::{LoginRequest, PasswordPolicy};
use super::error::AuthError;
use crate::session::SessionStore;
use compass_core::{performance, Account, UserDirectory};
use std::sync::Arc;
use tracing::{info, warn};

/// Decides whether a login attempt succeeds and, if so, installs the account
/// as the session identity. Single attempt, no retries, no lockout.
#[derive(Clone)]
pub struct Authenticator {
    directory: Arc<dyn UserDirectory>,
    store: Arc<SessionStore>,
    password_policy: PasswordPolicy,
}

impl Authenticator {
    pub fn new(directory: Arc<dyn UserDirectory>, store: Arc<SessionStore>) -> Self {
        Self {
            directory,
            store,
            password_policy: PasswordPolicy::default(),
        }
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    /// Attempt a login.
    ///
    /// The session is only touched on success. While the directory lookup is
    /// pending the store reports `is_loading` and keeps serving the previous
    /// session to readers.
    pub async fn login(&self, request: &LoginRequest) -> Result<Arc<Account>, AuthError> {
        let submitted = request.validate()?;

        let ticket = self.store.begin_login().await;
        let found = performance::measure_async(
            "directory_lookup",
            self.directory.find_by_email(&request.email),
        )
        .await;

        let account = match found {
            None => {
                warn!(email = %request.email, role = %submitted, "Login failed: unknown email");
                return Err(AuthError::NotFound {
                    email: request.email.clone(),
                });
            }
            Some(account) if account.role != submitted => {
                warn!(email = %request.email, role = %submitted, "Login failed: role mismatch");
                return Err(AuthError::RoleMismatch {
                    email: request.email.clone(),
                    submitted,
                });
            }
            Some(account) => account,
        };

        if !self.password_policy.verify(&account, &request.password) {
            warn!(email = %request.email, "Login failed: password rejected");
            return Err(AuthError::PasswordRejected {
                email: request.email.clone(),
            });
        }

        if !self
            .store
            .complete_login(ticket, Arc::clone(&account))
            .await
        {
            warn!(email = %request.email, "Login superseded before it resolved");
            return Err(AuthError::Superseded);
        }

        info!(account = %account.id, role = %account.role, "Login succeeded");
        Ok(account)
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::session::Session;
    use compass_core::Role;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            Arc::new(InMemoryDirectory::demo()),
            Arc::new(SessionStore::new()),
        )
    }

    #[tokio::test]
    async fn test_rejecting_policy_leaves_session_untouched() {
        let auth = authenticator().with_password_policy(PasswordPolicy::RejectAll);

        let err = auth
            .login(&LoginRequest::new(
                "robert.wilson@college.edu",
                "admin123",
                Role::Admin,
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::PasswordRejected { .. }));
        assert!(err.is_credential_failure());
        let snapshot = auth.session_store().snapshot().await;
        assert_eq!(snapshot.session, Session::Anonymous);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_login_success_populates_session() {
        let auth = authenticator();

        let account = auth
            .login(&LoginRequest::new(
                "lisa.anderson@college.edu",
                "anything",
                Role::Faculty,
            ))
            .await
            .unwrap();

        assert_eq!(account.name, "Prof. Lisa Anderson");
        match auth.session_store().current_session().await {
            Session::Authenticated(current) => assert!(Arc::ptr_eq(&current, &account)),
            Session::Anonymous => panic!("expected an authenticated session"),
        }
        assert!(!auth.session_store().is_loading());
    }

    #[tokio::test]
    async fn test_missing_field_skips_lookup() {
        let auth = authenticator();
        let request = LoginRequest {
            email: "john.smith@college.edu".to_string(),
            password: "secret".to_string(),
            role: None,
        };

        let err = auth.login(&request).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingField(_)));
        assert_eq!(
            auth.session_store().current_session().await,
            Session::Anonymous
        );
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_identity() {
        let auth = authenticator();
        auth.login(&LoginRequest::new(
            "robert.wilson@college.edu",
            "pw",
            Role::Admin,
        ))
        .await
        .unwrap();

        let err = auth
            .login(&LoginRequest::new("nobody@college.edu", "pw", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotFound { .. }));

        assert_eq!(
            auth.session_store().current_session().await.role(),
            Some(Role::Admin)
        );
        assert!(!auth.session_store().is_loading());
    }
}
