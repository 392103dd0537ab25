//! Compass Core - Core data structures and trait definitions
//!
//! Shared by every Campus Compass crate: the account model, the unified error
//! type, logging setup and configuration loading.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;
