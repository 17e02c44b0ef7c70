//! Pure authorization policy check.

use std::collections::HashSet;

use thiserror::Error;

use climabill_core::{TenantId, UserId};

use crate::permissions::{role_permissions, Permission};
use crate::roles::Role;

/// A fully resolved principal for authorization decisions.
///
/// Built by the API layer from verified token claims; this crate never
/// touches transport or storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a principal for a required permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let grants = role_permissions(principal.role);
    let perms: HashSet<&str> = grants.iter().map(|p| p.as_str()).collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
