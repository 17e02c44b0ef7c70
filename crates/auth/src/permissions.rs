//! Permissions and the role→permission table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Permission identifier.
///
/// Permissions are modeled as opaque `resource:action` strings (e.g.
/// `"emissions:write"`). The wildcard `"*"` lets policy layers say
/// "allow all" without enumerating domain permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permissions granted by a role.
///
/// Admin holds the wildcard; the other roles get explicit grants. The table
/// is the single policy source — handlers name the permission they need and
/// never inspect roles directly.
pub fn role_permissions(role: Role) -> Vec<Permission> {
    let grants: &[&'static str] = match role {
        Role::Admin => &["*"],
        Role::Manager => &[
            "companies:read",
            "companies:write",
            "emissions:read",
            "emissions:write",
            "marketplace:read",
            "marketplace:write",
            "supply_chain:read",
            "supply_chain:write",
            "compliance:read",
            "compliance:write",
            "users:read",
        ],
        Role::Analyst => &[
            "companies:read",
            "emissions:read",
            "emissions:write",
            "marketplace:read",
            "supply_chain:read",
            "compliance:read",
        ],
        Role::Viewer => &[
            "companies:read",
            "emissions:read",
            "marketplace:read",
            "supply_chain:read",
            "compliance:read",
        ],
    };

    grants.iter().map(|p| Permission::new(*p)).collect()
}
