//! Core trait definitions

use crate::types::Account;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only lookup of known accounts keyed by email.
///
/// Implementations must return at most one account per email. The lookup is
/// async so a directory may be backed by a remote call without changing the
/// login contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Exact, case-sensitive email lookup
    async fn find_by_email(&self, email: &str) -> Option<Arc<Account>>;

    /// All accounts, in directory order
    fn accounts(&self) -> Vec<Arc<Account>>;
}
