//! Portal routes and the role guard in front of them

pub mod guard;
pub mod table;

pub use guard::{decide, GuardDecision, Navigation, RouteGuard};
pub use table::{MenuItem, PortalPage, RouteMatch, RouteTable};
