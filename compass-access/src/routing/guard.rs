//! Route guard
//!
//! Stateless: every decision re-reads the session store, so a logout is seen
//! by the very next navigation.

use super::table::{PortalPage, RouteMatch, RouteTable};
use crate::session::{Session, SessionStore};
use compass_core::{Account, Role};
use std::sync::Arc;
use tracing::debug;

/// Whether a protected view may render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Outcome of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A portal page the current account may see
    Render {
        page: PortalPage,
        account: Arc<Account>,
    },
    /// The login page
    Public,
    Redirect(String),
    NotFound,
}

/// The only allowed case is an authenticated account whose role equals the
/// required role. Anonymous sessions and wrong-role sessions get the same
/// redirect.
pub fn decide(session: &Session, required: Role, login_path: &str) -> GuardDecision {
    match session {
        Session::Authenticated(account) if account.role == required => GuardDecision::Allow,
        _ => GuardDecision::Redirect(login_path.to_string()),
    }
}

/// Gates portal views by required role
#[derive(Debug, Clone)]
pub struct RouteGuard {
    store: Arc<SessionStore>,
    routes: RouteTable,
}

impl RouteGuard {
    pub fn new(store: Arc<SessionStore>, routes: RouteTable) -> Self {
        Self { store, routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide for the current session
    pub async fn authorize(&self, required: Role) -> GuardDecision {
        let session = self.store.current_session().await;
        let decision = decide(&session, required, self.routes.login_path());
        debug!(
            session = %session.summary(),
            required = %required,
            allowed = decision.is_allowed(),
            "Route guard decision"
        );
        decision
    }

    /// Resolve `path` and gate it.
    ///
    /// The portal subtree is guarded before its child page is looked up, so an
    /// unknown page under a portal the caller may not enter still redirects.
    pub async fn navigate(&self, path: &str) -> Navigation {
        match self.routes.resolve(path) {
            RouteMatch::Public => Navigation::Public,
            RouteMatch::Redirect(target) => Navigation::Redirect(target),
            RouteMatch::NotFound => Navigation::NotFound,
            RouteMatch::Portal { role, page } => {
                let session = self.store.current_session().await;
                match decide(&session, role, self.routes.login_path()) {
                    GuardDecision::Redirect(target) => {
                        debug!(path, session = %session.summary(), "Navigation redirected");
                        Navigation::Redirect(target)
                    }
                    GuardDecision::Allow => match (page, session) {
                        (Some(page), Session::Authenticated(account)) => Navigation::Render {
                            page: page.clone(),
                            account,
                        },
                        _ => Navigation::NotFound,
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::demo_accounts;

    fn student() -> Arc<Account> {
        Arc::new(demo_accounts().remove(0))
    }

    #[test]
    fn test_decide_covers_every_case() {
        let anonymous = Session::Anonymous;
        let signed_in = Session::Authenticated(student());

        for role in Role::ALL {
            assert_eq!(
                decide(&anonymous, role, "/login"),
                GuardDecision::Redirect("/login".to_string())
            );
        }

        assert_eq!(decide(&signed_in, Role::Student, "/login"), GuardDecision::Allow);
        assert_eq!(
            decide(&signed_in, Role::Faculty, "/login"),
            GuardDecision::Redirect("/login".to_string())
        );
        assert_eq!(
            decide(&signed_in, Role::Admin, "/login"),
            GuardDecision::Redirect("/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_navigate_renders_with_account() {
        let store = Arc::new(SessionStore::new());
        let guard = RouteGuard::new(Arc::clone(&store), RouteTable::default());
        let account = student();
        store.set_authenticated(Arc::clone(&account)).await;

        match guard.navigate("/student/results").await {
            Navigation::Render { page, account: rendered } => {
                assert_eq!(page.title, "Student Results");
                assert!(Arc::ptr_eq(&rendered, &account));
            }
            other => panic!("unexpected navigation: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_portal_page() {
        let store = Arc::new(SessionStore::new());
        let guard = RouteGuard::new(Arc::clone(&store), RouteTable::default());

        assert_eq!(
            guard.navigate("/student/grades").await,
            Navigation::Redirect("/login".to_string())
        );

        store.set_authenticated(student()).await;
        assert_eq!(guard.navigate("/student/grades").await, Navigation::NotFound);
        assert_eq!(
            guard.navigate("/admin/grades").await,
            Navigation::Redirect("/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_public_and_root() {
        let guard = RouteGuard::new(Arc::new(SessionStore::new()), RouteTable::default());
        assert_eq!(guard.navigate("/login").await, Navigation::Public);
        assert_eq!(
            guard.navigate("/").await,
            Navigation::Redirect("/login".to_string())
        );
        assert_eq!(guard.navigate("/nowhere").await, Navigation::NotFound);
    }
}
