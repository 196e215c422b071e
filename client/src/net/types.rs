//! Identity and session DTOs shared by the login flow, guard, and storage.
//!
//! DESIGN
//! ======
//! Field names serialize in camelCase so the persisted session keeps the
//! `{"user":{"email":..,"displayName":..},"role":..}` shape. A record whose
//! `displayName` is missing still decodes; `SessionStore::load` fills it in.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Workspace role a user signs in as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Employee,
}

impl Role {
    /// Wire and display name (`"admin"` / `"employee"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    /// Label shown on the role toggle.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
        }
    }

    /// Dashboard route for this role.
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Employee => "/employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User identity copied into a session on successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// The client-held record of who is signed in and as what.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub role: Role,
}

/// Identity returned by the external provider after interactive sign-in.
///
/// Never persisted directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub email: Option<String>,
    pub display_name: Option<String>,
}
