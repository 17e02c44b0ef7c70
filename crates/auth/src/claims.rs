//! JWT claims model.

use serde::{Deserialize, Serialize};

use climabill_core::{TenantId, UserId};

use crate::roles::Role;

/// Claims embedded in every access token.
///
/// A token binds a user identity to a tenant identity for a bounded time
/// window; nothing else is carried. The token is self-contained — no
/// server-side session state exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the authenticated user.
    pub sub: UserId,

    /// Tenant the subject acts within.
    pub tenant_id: TenantId,

    /// RBAC role within the tenant.
    pub role: Role,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiration (Unix timestamp, seconds).
    pub exp: i64,
}
