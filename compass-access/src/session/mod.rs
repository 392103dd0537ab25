//! Session Management Module
//!
//! Holds the one process-wide authentication state and the request-generation
//! guard used to discard stale login results.

pub mod store;
pub mod types;

pub use store::{LoginTicket, SessionStore};
pub use types::*;
