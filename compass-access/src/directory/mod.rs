//! User directory implementations
//!
//! [`InMemoryDirectory`] is the only real store; [`LatencyDirectory`] wraps any
//! directory to stand in for a remote lookup.

pub mod memory;
pub mod seed;

pub use memory::InMemoryDirectory;
pub use seed::demo_accounts;

use compass_core::{async_trait, Account, UserDirectory};
use std::sync::Arc;
use std::time::Duration;

/// Adds a fixed delay before every lookup
pub struct LatencyDirectory {
    inner: Arc<dyn UserDirectory>,
    latency: Duration,
}

impl LatencyDirectory {
    pub fn new(inner: Arc<dyn UserDirectory>, latency: Duration) -> Self {
        Self { inner, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl UserDirectory for LatencyDirectory {
    async fn find_by_email(&self, email: &str) -> Option<Arc<Account>> {
        tokio::time::sleep(self.latency).await;
        self.inner.find_by_email(email).await
    }

    fn accounts(&self) -> Vec<Arc<Account>> {
        self.inner.accounts()
    }
}
