//! RBAC roles.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use climabill_core::DomainError;

/// Role of a user within their tenant.
///
/// Roles form a strict hierarchy for coarse checks (`Viewer < Analyst <
/// Manager < Admin`); fine-grained access goes through the role→permission
/// table in [`crate::permissions`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Viewer,
    Analyst,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Analyst => "analyst",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// True when this role sits at or above `other` in the hierarchy.
    pub fn at_least(&self, other: Role) -> bool {
        self >= &other
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Self::Viewer),
            "analyst" => Ok(Self::Analyst),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_ordering() {
        assert!(Role::Admin.at_least(Role::Manager));
        assert!(Role::Manager.at_least(Role::Manager));
        assert!(!Role::Viewer.at_least(Role::Analyst));
    }

    #[test]
    fn serde_names_are_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"analyst\"").unwrap(),
            Role::Analyst
        );
    }
}
