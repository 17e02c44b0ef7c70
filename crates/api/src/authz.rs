//! Handler-boundary authorization guard.
//!
//! Enforces role permissions before any store access, while keeping domain
//! crates and infra auth-agnostic.

use climabill_auth::{authorize, Permission, Principal};

use crate::app::errors::ApiError;
use crate::context::{PrincipalContext, TenantContext};

/// Check that the request principal holds `permission` in its tenant.
///
/// Intended to be called at the top of every mutating (and most reading)
/// handlers, **before** touching storage.
pub fn require(
    tenant: &TenantContext,
    principal: &PrincipalContext,
    permission: &'static str,
) -> Result<(), ApiError> {
    let resolved = Principal {
        user_id: principal.user_id(),
        tenant_id: tenant.tenant_id(),
        role: principal.role(),
    };

    authorize(&resolved, &Permission::new(permission))
        .map_err(|e| ApiError::forbidden(e.to_string()))
}
