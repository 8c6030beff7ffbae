//! Profile entity and the closed role enum.
//!
//! A profile is the application-level user record, linked 1:1 to an
//! identity row holding the login credentials. Roles are a closed set;
//! every role string entering the system goes through [`Role::parse`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// The two application roles.
///
/// Role is immutable after profile creation; none of the update flows
/// touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "profile_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }

    /// Parse a role string. Unknown strings yield `None` so callers fail
    /// closed rather than treating an unrecognized role as authorized.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user profile as stored in the database.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("student"), Some(Role::Student));
    }

    #[test]
    fn test_parse_unknown_role_fails_closed() {
        assert_eq!(Role::parse("teacher"), None);
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Admin, Role::Student] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(
            serde_json::from_str::<Role>(r#""student""#).unwrap(),
            Role::Student
        );
    }

    #[test]
    fn test_profile_serialization() {
        let profile = Profile {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            role: Role::Student,
            created_at: Utc::now(),
        };

        let serialized = serde_json::to_string(&profile).unwrap();
        assert!(serialized.contains("jane@example.com"));
        assert!(serialized.contains(r#""role":"student""#));
    }
}
