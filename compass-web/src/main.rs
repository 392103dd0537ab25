//! Compass Web Server
//!
//! HTTP front end for the Campus Compass login and portals.

use anyhow::Context;
use clap::Parser;
use compass_core::{init_logging, CompassConfig};
use compass_web::{CompassServerBuilder, WebError};
use std::path::PathBuf;
use tracing::info;

/// Compass Web Server - role-based campus portals
#[derive(Parser)]
#[command(name = "compass-web")]
#[command(about = "HTTP server for Campus Compass")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// JSON file of accounts instead of the demo directory
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Delay added to every directory lookup
    #[arg(long)]
    login_latency_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, config: &mut CompassConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.dev {
            config.server.dev_mode = true;
        }
        if let Some(directory) = self.directory {
            config.auth.directory_path = Some(directory);
        }
        if let Some(latency) = self.login_latency_ms {
            config.auth.simulated_latency_ms = latency;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    let mut config =
        CompassConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;
    args.apply(&mut config);

    if config.server.dev_mode {
        config
            .logging
            .filter_directives
            .push("tower_http=debug".to_string());
    }
    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(address = %config.address(), "Building server");
    let server = CompassServerBuilder::new()
        .config(config)
        .build()
        .await
        .inspect_err(|e| {
            if let WebError::Core(err) = e {
                err.log();
            }
        })
        .context("Failed to build server")?;

    server.start().await.context("Server failed")?;
    Ok(())
}
