//! Configuration management
//!
//! Load order: explicit file, then the default locations, then built-in
//! defaults. Environment overrides are applied on top by the binaries.

use crate::error::{CompassError, CompassResult, ErrorContext};
use crate::logging::LoggingConfig;
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration shared by the web and terminal shells
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP shell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
        }
    }
}

/// Access control settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where the route guard sends unauthorized navigations
    pub login_path: String,
    /// JSON file of accounts; the built-in demo directory is used when unset
    pub directory_path: Option<PathBuf>,
    /// Delay added to every directory lookup, in milliseconds
    pub simulated_latency_ms: u64,
    /// Whether the login page lists the directory's emails
    pub show_demo_credentials: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            directory_path: None,
            simulated_latency_ms: 0,
            show_demo_credentials: true,
        }
    }
}

impl CompassConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CompassResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CompassError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: CompassConfig = toml::from_str(&content).map_err(|e| {
            crate::config_error!(format!("Failed to parse config: {}", e), "config", e)
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CompassResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CompassError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| CompassError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Load from `path` if given, otherwise from the first default location
    /// that exists, otherwise defaults.
    pub fn load(path: Option<&Path>) -> CompassResult<Self> {
        if let Some(path) = path {
            tracing::info!("Loading configuration from {:?}", path);
            return Self::from_file(path);
        }

        for candidate in Self::default_locations() {
            if candidate.exists() {
                tracing::info!("Loading configuration from {:?}", candidate);
                return Self::from_file(candidate);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Candidate config files, most specific first
    pub fn default_locations() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|d| d.join("compass").join("config.toml")),
            dirs::home_dir().map(|d| d.join(".compass").join("config.toml")),
            Some(PathBuf::from("compass.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Where `compass config --init` writes
    pub fn user_config_path() -> CompassResult<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
            .map(|d| d.join("compass").join("config.toml"))
            .ok_or_else(|| CompassError::Config {
                message: "Could not determine a configuration directory".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("user_config_path")
                    .with_suggestion("Pass --config with an explicit path"),
            })
    }

    /// Apply `COMPASS_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> CompassResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CompassResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("COMPASS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("COMPASS_PORT") {
            self.server.port = parse_override("COMPASS_PORT", &port)?;
        }
        if let Some(dev_mode) = lookup("COMPASS_DEV_MODE") {
            self.server.dev_mode = parse_override("COMPASS_DEV_MODE", &dev_mode)?;
        }
        if let Some(directory) = lookup("COMPASS_DIRECTORY") {
            self.auth.directory_path = Some(PathBuf::from(directory));
        }
        if let Some(latency) = lookup("COMPASS_LOGIN_LATENCY_MS") {
            self.auth.simulated_latency_ms = parse_override("COMPASS_LOGIN_LATENCY_MS", &latency)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CompassResult<()> {
        if self.server.port == 0 {
            return Err(crate::validation_error!(
                "Server port must be greater than 0",
                "server.port",
                "config",
                "Set server.port to a positive value"
            ));
        }

        let login_path = &self.auth.login_path;
        if !login_path.starts_with('/') {
            return Err(crate::validation_error!(
                format!("Login path must be an absolute path, got '{}'", login_path),
                "auth.login_path",
                "config",
                "Use a path such as /login"
            ));
        }

        let reserved = login_path == "/"
            || Role::ALL.iter().any(|role| {
                let prefix = role.portal_prefix();
                *login_path == prefix || login_path.starts_with(&format!("{}/", prefix))
            });
        if reserved {
            return Err(crate::validation_error!(
                format!(
                    "Login path '{}' collides with the root or a portal route",
                    login_path
                ),
                "auth.login_path",
                "config",
                "Use a path outside /student, /faculty and /admin"
            ));
        }

        // Request paths are matched without a trailing slash
        if login_path.ends_with('/') {
            return Err(crate::validation_error!(
                format!("Login path '{}' must not end with '/'", login_path),
                "auth.login_path",
                "config",
                "Drop the trailing slash, e.g. /login"
            ));
        }

        Ok(())
    }

    /// Server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> CompassResult<T> {
    value.parse().map_err(|_| CompassError::Config {
        message: format!("Invalid value for {}: {}", key, value),
        source: None,
        context: ErrorContext::new("config")
            .with_operation("env_override")
            .with_metadata("key", key),
    })
}
