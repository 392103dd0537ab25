use super::credentials::LoginField;
use compass_core::Role;

/// Shown for every credential failure so shells never reveal which emails
/// are registered.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please try again.";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// Why a login attempt failed. All variants are ordinary, user-correctable
/// outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing required field: {0}")]
    MissingField(LoginField),

    #[error("No account registered for {email}")]
    NotFound { email: String },

    #[error("Account {email} is not registered as {submitted}")]
    RoleMismatch { email: String, submitted: Role },

    #[error("Password rejected for {email}")]
    PasswordRejected { email: String },

    #[error("Login superseded by a newer request")]
    Superseded,
}

impl AuthError {
    /// Wrong email, role or password
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            AuthError::NotFound { .. }
                | AuthError::RoleMismatch { .. }
                | AuthError::PasswordRejected { .. }
        )
    }

    /// Message safe to show on the login form
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingField(_) => MISSING_FIELDS_MESSAGE,
            AuthError::NotFound { .. }
            | AuthError::RoleMismatch { .. }
            | AuthError::PasswordRejected { .. } => INVALID_CREDENTIALS_MESSAGE,
            AuthError::Superseded => "A newer sign-in attempt replaced this one.",
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingField(_) => "missing_field",
            AuthError::NotFound { .. }
            | AuthError::RoleMismatch { .. }
            | AuthError::PasswordRejected { .. } => "invalid_credentials",
            AuthError::Superseded => "superseded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_share_message() {
        let not_found = AuthError::NotFound {
            email: "unknown@x.edu".to_string(),
        };
        let mismatch = AuthError::RoleMismatch {
            email: "john.smith@college.edu".to_string(),
            submitted: Role::Admin,
        };

        assert_eq!(not_found.user_message(), mismatch.user_message());
        assert_eq!(not_found.code(), mismatch.code());
        assert!(not_found.is_credential_failure());
        assert!(mismatch.is_credential_failure());
    }

    #[test]
    fn test_missing_field_message() {
        let err = AuthError::MissingField(LoginField::Password);
        assert_eq!(err.user_message(), MISSING_FIELDS_MESSAGE);
        assert_eq!(err.to_string(), "Missing required field: password");
        assert!(!err.is_credential_failure());
    }
}
