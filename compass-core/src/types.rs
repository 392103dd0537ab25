//! Core data type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal role. Every account carries exactly one, and it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    /// Human-readable label used by the login form
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty",
            Role::Admin => "Administrator",
        }
    }

    /// Path prefix of the portal owned by this role, e.g. `/student`
    pub fn portal_prefix(&self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not one of the three portal roles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" | "administrator" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Opaque account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role-specific profile attributes. The access layer never inspects these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Student {
        student_id: String,
        semester: u8,
        department: String,
        batch: String,
    },
    Faculty {
        faculty_id: String,
        department: String,
        subjects: Vec<String>,
    },
    Admin {
        admin_id: String,
        permissions: Vec<String>,
    },
}

impl Profile {
    /// Role this profile shape belongs to
    pub fn role(&self) -> Role {
        match self {
            Profile::Student { .. } => Role::Student,
            Profile::Faculty { .. } => Role::Faculty,
            Profile::Admin { .. } => Role::Admin,
        }
    }
}

/// Directory entry for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub profile: Profile,
}

impl Account {
    /// Get user display string
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

/// What the login page shows under "Demo Credentials"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoCredential {
    pub role: Role,
    pub email: String,
}
