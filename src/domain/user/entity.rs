use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Privilege level of a portal account.
///
/// A closed three-value set with no implicit ordering: access-control sites
/// interpret ADMIN and DEVELOPER as admin-level, and only DEVELOPER as
/// developer-level. The role field is mutated exclusively through the
/// role-change workflow in `application::change_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, TS)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
    Developer,
}

#[derive(Debug, Error)]
#[error("invalid role: {0}")]
pub struct InvalidRole(pub String);

impl Role {
    /// ADMIN and DEVELOPER both clear the staff bar.
    pub fn is_admin_level(self) -> bool {
        matches!(self, Role::Admin | Role::Developer)
    }

    pub fn is_developer_level(self) -> bool {
        matches!(self, Role::Developer)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Developer => "DEVELOPER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            "DEVELOPER" => Ok(Role::Developer),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

/// A registered portal account.
///
/// The password hash never leaves the server: it is skipped on serialization
/// and on the exported TypeScript type.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: Role,
    pub full_name: String,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub avatar: Option<String>,
}

/// Self-service profile mutation; `password_hash` is set only when the caller
/// proved knowledge of the current password.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Role;
    use std::str::FromStr;

    #[test]
    fn role_levels_are_exhaustive() {
        assert!(!Role::User.is_admin_level());
        assert!(Role::Admin.is_admin_level());
        assert!(Role::Developer.is_admin_level());

        assert!(!Role::User.is_developer_level());
        assert!(!Role::Admin.is_developer_level());
        assert!(Role::Developer.is_developer_level());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::User, Role::Admin, Role::Developer] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("SUPERUSER").is_err());
        assert!(Role::from_str("admin").is_err());
    }
}
