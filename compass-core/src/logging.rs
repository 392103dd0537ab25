//! Unified logging system
//!
//! Provides structured logging with performance monitoring and configurable output

use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Whether to include file and line information
    pub include_location: bool,
    /// Whether to include thread information
    pub include_thread: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file path (if log_to_file is true)
    pub log_file_path: Option<String>,
    /// Whether to log span close events with timings
    pub enable_performance_monitoring: bool,
    /// Custom filter directives
    pub filter_directives: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            log_to_file: false,
            log_file_path: None,
            enable_performance_monitoring: false,
            filter_directives: vec![
                "compass_core=info".to_string(),
                "compass_access=info".to_string(),
            ],
        }
    }
}

impl LoggingConfig {
    fn span_events(&self) -> FmtSpan {
        if self.enable_performance_monitoring {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn make_writer(&self) -> Result<BoxMakeWriter, Box<dyn std::error::Error + Send + Sync>> {
        if !self.log_to_file {
            return Ok(BoxMakeWriter::new(io::stdout));
        }

        let Some(log_path) = &self.log_file_path else {
            return Err("log_file_path must be specified when log_to_file is true".into());
        };

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(BoxMakeWriter::new(Mutex::new(file)))
    }
}

/// Initialize the logging system
///
/// `RUST_LOG` wins over `config.level` when set. Fails if a global subscriber
/// is already installed.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for directive in &config.filter_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    let writer = config.make_writer()?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(config.span_events())
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_ids(config.include_thread)
                    .with_thread_names(config.include_thread)
                    .with_writer(writer),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(config.span_events())
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_ids(config.include_thread)
                    .with_thread_names(config.include_thread)
                    .with_writer(writer),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_span_events(config.span_events())
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_ids(config.include_thread)
                    .with_thread_names(config.include_thread)
                    .with_writer(writer),
            )
            .try_init()?,
    }

    Ok(())
}

/// Performance monitoring utilities
pub mod performance {
    use std::time::Instant;
    use tracing::{info_span, Instrument};

    /// Measure and log execution time of an async operation
    pub async fn measure_async<F, T>(operation_name: &str, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let span = info_span!("performance", operation = operation_name);
        let start = Instant::now();

        let result = future.instrument(span).await;

        tracing::debug!(
            target: "performance",
            operation = operation_name,
            duration_ms = start.elapsed().as_millis(),
            "Operation completed"
        );

        result
    }
}

/// Logging macros for common patterns
#[macro_export]
macro_rules! log_operation_start {
    ($operation:expr) => {
        tracing::info!(
            operation = $operation,
            "Starting operation"
        );
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info!(
            operation = $operation,
            $($field)*,
            "Starting operation"
        );
    };
}

#[macro_export]
macro_rules! log_operation_success {
    ($operation:expr) => {
        tracing::info!(
            operation = $operation,
            "Operation completed successfully"
        );
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info!(
            operation = $operation,
            $($field)*,
            "Operation completed successfully"
        );
    };
}

#[macro_export]
macro_rules! log_operation_error {
    ($operation:expr, $error:expr) => {
        tracing::warn!(
            operation = $operation,
            error = %$error,
            "Operation failed"
        );
    };
    ($operation:expr, $error:expr, $($field:tt)*) => {
        tracing::warn!(
            operation = $operation,
            error = %$error,
            $($field)*,
            "Operation failed"
        );
    };
}
