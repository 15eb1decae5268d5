//! Session identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::UserId;

/// Account role as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Seller,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated user, as cached on the client.
///
/// The authoritative copy lives on the backend; this is refreshed by an
/// identity fetch and dropped on logout or when that fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_values_only() {
        assert_eq!("seller".parse::<Role>(), Ok(Role::Seller));
        assert_eq!(" admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(
            "root".parse::<Role>(),
            Err(DomainError::UnknownRole("root".into()))
        );
    }

    #[test]
    fn identity_ignores_extra_fields_and_rejects_unknown_roles() {
        let json = r#"{"id": 1, "name": "Ann", "email": "ann@example.com", "role": "user"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.name, "Ann");

        let json = r#"{"id": 1, "name": "Ann", "role": "superuser"}"#;
        assert!(serde_json::from_str::<Identity>(json).is_err());
    }
}
