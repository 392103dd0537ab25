//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type CompassResult<T> = Result<T, CompassError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for Campus Compass
#[derive(Error, Debug)]
pub enum CompassError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Directory error: {message}")]
    Directory {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CompassError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            CompassError::Config { context, .. } => Some(context),
            CompassError::Directory { context, .. } => Some(context),
            CompassError::Validation { context, .. } => Some(context),
            CompassError::Io(_) | CompassError::Serialization(_) => None,
        }
    }

    /// Log the error with appropriate level, including recovery suggestions
    pub fn log(&self) {
        let suggestions = self
            .context()
            .map(|c| c.recovery_suggestions.join("; "))
            .unwrap_or_default();

        match self {
            CompassError::Config { .. } | CompassError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    suggestions = %suggestions,
                    "Configuration or validation error"
                );
            }
            CompassError::Io(_) => {
                warn!(error = %self, "IO error (may be recoverable)");
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    suggestions = %suggestions,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::CompassError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'compass config --init' to create default config"),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::CompassError::Config {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'compass config --init' to create default config"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::CompassError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
    ($msg:expr, $field:expr, $component:expr, $suggestion:expr) => {
        $crate::CompassError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component).with_suggestion($suggestion),
        }
    };
}

#[macro_export]
macro_rules! directory_error {
    ($msg:expr, $component:expr) => {
        $crate::CompassError::Directory {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::CompassError::Directory {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component),
        }
    };
}
