//! Authentication Module
//!
//! A login succeeds when the email is in the directory and the submitted role
//! equals the account's stored role. The password only has to be non-empty;
//! see [`PasswordPolicy`].

pub mod authenticator;
pub mod credentials;
pub mod error;

pub use authenticator::Authenticator;
pub use credentials::{LoginField, LoginRequest, PasswordPolicy};
pub use error::AuthError;
