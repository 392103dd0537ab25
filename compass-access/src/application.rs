//! Application shell facade
//!
//! Owns the one [`SessionStore`] and wires it into the authenticator and the
//! route guard. Web and terminal shells hold a `CompassApplication` (behind an
//! `Arc` when shared) and go through it for every session operation.

use crate::auth::{AuthError, Authenticator, LoginRequest};
use crate::directory::{memory::credentials_of, InMemoryDirectory, LatencyDirectory};
use crate::routing::{GuardDecision, MenuItem, Navigation, RouteGuard, RouteTable};
use crate::session::{SessionSnapshot, SessionStore};
use compass_core::{Account, AuthConfig, CompassResult, DemoCredential, Role, UserDirectory};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct CompassApplication {
    directory: Arc<dyn UserDirectory>,
    store: Arc<SessionStore>,
    authenticator: Authenticator,
    guard: RouteGuard,
}

impl CompassApplication {
    /// Build around an existing directory with a fresh anonymous session
    pub fn new(directory: Arc<dyn UserDirectory>, login_path: &str) -> Self {
        let store = Arc::new(SessionStore::new());
        let authenticator = Authenticator::new(Arc::clone(&directory), Arc::clone(&store));
        let guard = RouteGuard::new(Arc::clone(&store), RouteTable::new(login_path));

        Self {
            directory,
            store,
            authenticator,
            guard,
        }
    }

    /// Demo directory, default login path, no latency
    pub fn demo() -> Self {
        Self::new(Arc::new(InMemoryDirectory::demo()), "/login")
    }

    /// Build from configuration: directory file or demo accounts, plus the
    /// configured lookup latency.
    pub async fn from_config(config: &AuthConfig) -> CompassResult<Self> {
        let directory: Arc<dyn UserDirectory> = match &config.directory_path {
            Some(path) => Arc::new(InMemoryDirectory::from_json_file(path).await?),
            None => Arc::new(InMemoryDirectory::demo()),
        };

        let directory: Arc<dyn UserDirectory> = if config.simulated_latency_ms > 0 {
            Arc::new(LatencyDirectory::new(
                directory,
                Duration::from_millis(config.simulated_latency_ms),
            ))
        } else {
            directory
        };

        info!(
            accounts = directory.accounts().len(),
            latency_ms = config.simulated_latency_ms,
            "Access layer initialized"
        );
        Ok(Self::new(directory, &config.login_path))
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<Arc<Account>, AuthError> {
        self.authenticator.login(request).await
    }

    /// Sign out. Idempotent.
    pub async fn logout(&self) {
        self.store.clear().await;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot().await
    }

    pub async fn authorize(&self, required: Role) -> GuardDecision {
        self.guard.authorize(required).await
    }

    pub async fn navigate(&self, path: &str) -> Navigation {
        self.guard.navigate(path).await
    }

    /// Sidebar for whoever is signed in
    pub async fn menu(&self) -> Vec<MenuItem> {
        let role = self.store.current_session().await.role();
        self.routes().menu(role)
    }

    /// Email and role of every directory account
    pub fn demo_credentials(&self) -> Vec<DemoCredential> {
        credentials_of(&self.directory.accounts())
    }

    pub fn landing_path(&self, role: Role) -> String {
        self.routes().landing_path(role)
    }

    pub fn routes(&self) -> &RouteTable {
        self.guard.routes()
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}
