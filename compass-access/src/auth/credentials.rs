//! Login form input and password policy

use super::error::AuthError;
use compass_core::{Account, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginField {
    Email,
    Password,
    Role,
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginField::Email => write!(f, "email"),
            LoginField::Password => write!(f, "password"),
            LoginField::Role => write!(f, "role"),
        }
    }
}

/// A submitted login form. `role` is `None` when nothing was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl LoginRequest {
    pub fn new<E: Into<String>, P: Into<String>>(email: E, password: P, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Some(role),
        }
    }

    /// Every field must be filled in. Values are taken as typed, so a
    /// blank-looking password still counts. Returns the selected role.
    pub fn validate(&self) -> Result<Role, AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::MissingField(LoginField::Email));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField(LoginField::Password));
        }
        self.role.ok_or(AuthError::MissingField(LoginField::Role))
    }
}

/// Password check applied after the directory lookup.
///
/// Accounts carry no secret, so the only policy accepts any non-empty
/// password. Since [`LoginRequest::validate`] already rejects an empty one,
/// `AuthError::PasswordRejected` is unreachable with this policy; it is the
/// outcome a verifying policy, added here as a new variant, would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    #[default]
    AcceptAnyNonEmpty,
    #[cfg(test)]
    RejectAll,
}

impl PasswordPolicy {
    pub fn verify(&self, _account: &Account, password: &str) -> bool {
        match self {
            PasswordPolicy::AcceptAnyNonEmpty => !password.is_empty(),
            #[cfg(test)]
            PasswordPolicy::RejectAll => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::demo_accounts;

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut request = LoginRequest::new("", "", Role::Student);
        assert_eq!(
            request.validate(),
            Err(AuthError::MissingField(LoginField::Email))
        );

        request.email = "john.smith@college.edu".to_string();
        assert_eq!(
            request.validate(),
            Err(AuthError::MissingField(LoginField::Password))
        );

        request.password = "   ".to_string();
        assert_eq!(request.validate(), Ok(Role::Student));

        request.email = " ".to_string();
        assert_eq!(request.validate(), Ok(Role::Student));

        request.email = "john.smith@college.edu".to_string();
        request.password = "hunter2".to_string();
        request.role = None;
        assert_eq!(
            request.validate(),
            Err(AuthError::MissingField(LoginField::Role))
        );

        request.role = Some(Role::Student);
        assert_eq!(request.validate(), Ok(Role::Student));
    }

    #[test]
    fn test_any_non_empty_password_is_accepted() {
        let account = demo_accounts().remove(0);
        let policy = PasswordPolicy::default();

        assert!(policy.verify(&account, "x"));
        assert!(policy.verify(&account, "definitely-not-the-password"));
        assert!(policy.verify(&account, "   "));
        assert!(!policy.verify(&account, ""));
    }
}
