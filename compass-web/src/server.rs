//! Compass Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebError, WebResult};
use axum::serve;
use compass_core::CompassConfig;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Main Compass web server
pub struct CompassServer {
    config: CompassConfig,
    state: AppState,
}

impl CompassServer {
    /// Create a new server
    pub async fn new(config: CompassConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server and run until Ctrl-C
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Compass web server");
        info!("Server address: http://{}", address);
        info!("Development mode: {}", self.config.server.dev_mode);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Builder for CompassServer
pub struct CompassServerBuilder {
    config: CompassConfig,
}

impl CompassServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: CompassConfig::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn config(mut self, config: CompassConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.server.dev_mode = dev_mode;
        self
    }

    /// Delay every directory lookup
    pub fn login_latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.auth.simulated_latency_ms = latency_ms;
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<CompassServer> {
        CompassServer::new(self.config).await
    }
}

impl Default for CompassServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_creation() {
        let server = CompassServer::new(CompassConfig::default()).await;
        assert!(server.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let server = CompassServerBuilder::new().port(0).build().await;
        assert!(matches!(server, Err(WebError::Core(_))));
    }

    #[test]
    fn test_server_builder() {
        let builder = CompassServerBuilder::new()
            .host("localhost")
            .port(3000)
            .dev_mode(true)
            .login_latency_ms(250);

        assert_eq!(builder.config.server.host, "localhost");
        assert_eq!(builder.config.server.port, 3000);
        assert!(builder.config.server.dev_mode);
        assert_eq!(builder.config.auth.simulated_latency_ms, 250);
    }
}
