//! Shared application state

use crate::{WebError, WebResult};
use compass_access::CompassApplication;
use compass_core::CompassConfig;
use std::sync::Arc;
use tracing::info;

/// Handed to every handler. Cloning shares the one session.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<CompassConfig>,
    /// Access core: directory, session store, authenticator, guard
    pub application: Arc<CompassApplication>,
}

impl AppState {
    /// Create state from configuration
    pub async fn new(config: CompassConfig) -> WebResult<Self> {
        config.validate()?;

        let application = CompassApplication::from_config(&config.auth)
            .await
            .map_err(|e| WebError::Config(format!("Failed to create access layer: {}", e)))?;

        info!(
            login_path = %config.auth.login_path,
            demo_credentials = config.auth.show_demo_credentials,
            "Application state initialized"
        );
        Ok(Self::with_application(config, application))
    }

    /// Wrap an already built application
    pub fn with_application(config: CompassConfig, application: CompassApplication) -> Self {
        Self {
            config: Arc::new(config),
            application: Arc::new(application),
        }
    }

    pub fn login_path(&self) -> &str {
        self.application.routes().login_path()
    }
}
