//! In-memory user directory

use super::seed::demo_accounts;
use compass_core::{
    async_trait, directory_error, Account, CompassError, CompassResult, DemoCredential,
    ErrorContext, UserDirectory,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Static account lookup keyed by email
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    accounts: Vec<Arc<Account>>,
    by_email: HashMap<String, usize>,
}

impl InMemoryDirectory {
    /// Build a directory, rejecting duplicate emails or ids and profiles whose
    /// shape disagrees with the account's role.
    pub fn new(accounts: Vec<Account>) -> CompassResult<Self> {
        let mut by_email = HashMap::with_capacity(accounts.len());
        let mut ids = HashSet::with_capacity(accounts.len());

        for (index, account) in accounts.iter().enumerate() {
            if account.email.trim().is_empty() {
                return Err(directory_error!(
                    format!("Account {} has an empty email", account.id),
                    "directory"
                ));
            }
            if account.profile.role() != account.role {
                return Err(directory_error!(
                    format!(
                        "Account {} has role {} but a {} profile",
                        account.id,
                        account.role,
                        account.profile.role()
                    ),
                    "directory"
                ));
            }
            if !ids.insert(account.id.clone()) {
                return Err(directory_error!(
                    format!("Duplicate account id: {}", account.id),
                    "directory"
                ));
            }
            if by_email.insert(account.email.clone(), index).is_some() {
                return Err(directory_error!(
                    format!("Duplicate account email: {}", account.email),
                    "directory"
                ));
            }
        }

        Ok(Self {
            accounts: accounts.into_iter().map(Arc::new).collect(),
            by_email,
        })
    }

    /// Directory holding the built-in demo accounts
    pub fn demo() -> Self {
        let accounts = demo_accounts();
        let by_email = accounts
            .iter()
            .enumerate()
            .map(|(index, account)| (account.email.clone(), index))
            .collect();

        Self {
            accounts: accounts.into_iter().map(Arc::new).collect(),
            by_email,
        }
    }

    /// Load accounts from a JSON array file
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> CompassResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CompassError::Directory {
                message: format!("Failed to read directory file: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("directory")
                    .with_operation("read_file")
                    .with_metadata("path", &path.display().to_string()),
            })?;

        let accounts: Vec<Account> =
            serde_json::from_str(&content).map_err(|e| CompassError::Directory {
                message: format!("Failed to parse directory file: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("directory")
                    .with_operation("parse_json")
                    .with_metadata("path", &path.display().to_string())
                    .with_suggestion("Each account needs id, name, email, role and profile"),
            })?;

        let directory = Self::new(accounts)?;
        info!(
            "Loaded {} accounts from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Email and role of every account, for the login page hint
    pub fn demo_credentials(&self) -> Vec<DemoCredential> {
        credentials_of(&self.accounts)
    }
}

/// Email and role of each account, in order
pub fn credentials_of(accounts: &[Arc<Account>]) -> Vec<DemoCredential> {
    accounts
        .iter()
        .map(|account| DemoCredential {
            role: account.role,
            email: account.email.clone(),
        })
        .collect()
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_email(&self, email: &str) -> Option<Arc<Account>> {
        let found = self
            .by_email
            .get(email)
            .map(|&index| Arc::clone(&self.accounts[index]));
        debug!(email, found = found.is_some(), "Directory lookup");
        found
    }

    fn accounts(&self) -> Vec<Arc<Account>> {
        self.accounts.clone()
    }
}
