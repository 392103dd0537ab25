//! Compass Access - authentication, session and role-based route gating
//!
//! The pieces, leaves first:
//!
//! - **Directory**: read-only account lookup by email
//! - **Session**: the single process-wide authentication state
//! - **Auth**: validates a login attempt and populates the session
//! - **Routing**: the portal route table and the guard that gates it
//!
//! [`CompassApplication`] constructs one [`SessionStore`] and hands the same
//! `Arc` to the authenticator and the guard. Shells (web, terminal) own the
//! application value and never build a second store.

pub mod application;
pub mod auth;
pub mod directory;
pub mod routing;
pub mod session;

pub use application::CompassApplication;
pub use auth::{AuthError, Authenticator, LoginField, LoginRequest, PasswordPolicy};
pub use directory::{demo_accounts, InMemoryDirectory, LatencyDirectory};
pub use routing::{
    decide, GuardDecision, MenuItem, Navigation, PortalPage, RouteGuard, RouteMatch, RouteTable,
};
pub use session::{LoginTicket, Session, SessionSnapshot, SessionStore};
