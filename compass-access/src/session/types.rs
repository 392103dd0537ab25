//! Session value types

use chrono::{DateTime, Utc};
use compass_core::{Account, Role};
use std::sync::Arc;

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    /// Holds the directory's own account value, not a copy
    Authenticated(Arc<Account>),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn account(&self) -> Option<&Arc<Account>> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(account) => Some(account),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.account().map(|account| account.role)
    }

    /// Create a summary string for logging
    pub fn summary(&self) -> String {
        match self {
            Session::Anonymous => "anonymous".to_string(),
            Session::Authenticated(account) => {
                format!("{}({})", account.id, account.role)
            }
        }
    }
}

/// Point-in-time view of the session store, as reported to shells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Session,
    /// True while at least one login attempt is pending
    pub is_loading: bool,
    /// When the current identity logged in
    pub authenticated_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn state_name(&self) -> &'static str {
        if self.session.is_authenticated() {
            "authenticated"
        } else {
            "anonymous"
        }
    }
}
