//! Session store
//!
//! Every mutation takes the write lock, so a reader sees either the state
//! before a transition or the state after it. The store must be constructed
//! once by the application shell and shared by `Arc`.

use super::types::{Session, SessionSnapshot};
use chrono::{DateTime, Utc};
use compass_core::Account;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct SessionState {
    session: Session,
    authenticated_at: Option<DateTime<Utc>>,
    /// Bumped by every `begin_login`, `set_authenticated` and `clear`
    generation: u64,
}

/// Holds the single process-wide session
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    in_flight: Arc<AtomicUsize>,
}

/// Claim on the right to apply one login result.
///
/// Only the ticket carrying the latest generation may apply its result.
/// Dropping a ticket, on any path, releases its share of the loading flag.
#[derive(Debug)]
pub struct LoginTicket {
    generation: u64,
    in_flight: Arc<AtomicUsize>,
}

impl LoginTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for LoginTicket {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SessionStore {
    /// Create an anonymous store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session. Never fails.
    pub async fn current_session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    /// Current session plus loading flag and login time
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            session: state.session.clone(),
            is_loading: self.is_loading(),
            authenticated_at: state.authenticated_at,
        }
    }

    /// Whether a login attempt is pending
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Replace the session with `account`, whatever it was before.
    ///
    /// Pending logins are superseded.
    pub async fn set_authenticated(&self, account: Arc<Account>) {
        let mut state = self.state.write().await;
        state.generation += 1;
        Self::apply(&mut state, account);
    }

    /// Return to anonymous. Idempotent; pending logins are superseded.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        if let Session::Authenticated(account) = &state.session {
            info!(account = %account.id, "Session cleared");
        }
        state.session = Session::Anonymous;
        state.authenticated_at = None;
    }

    /// Register a pending login. Supersedes any earlier pending login.
    pub async fn begin_login(&self) -> LoginTicket {
        let mut state = self.state.write().await;
        state.generation += 1;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        debug!(generation = state.generation, "Login started");

        LoginTicket {
            generation: state.generation,
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Apply a login result if `ticket` is still the latest request.
    ///
    /// Returns false, leaving the session untouched, when a newer login,
    /// a direct `set_authenticated` or a `clear` happened since `begin_login`.
    pub async fn complete_login(&self, ticket: LoginTicket, account: Arc<Account>) -> bool {
        let mut state = self.state.write().await;
        if state.generation != ticket.generation {
            debug!(
                ticket = ticket.generation,
                latest = state.generation,
                "Discarding stale login result"
            );
            return false;
        }

        Self::apply(&mut state, account);
        true
    }

    fn apply(state: &mut SessionState, account: Arc<Account>) {
        info!(account = %account.id, role = %account.role, "Session authenticated");
        state.session = Session::Authenticated(account);
        state.authenticated_at = Some(Utc::now());
    }
}
