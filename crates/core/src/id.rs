//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $t:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a tenant (the multi-tenant isolation boundary).
    ///
    /// The `{company_id}` path segment of the HTTP API addresses this id:
    /// a tenant *is* the company account.
    TenantId, "TenantId"
);

uuid_id!(
    /// Identifier of a user (actor identity). A user belongs to exactly one tenant.
    UserId, "UserId"
);

uuid_id!(
    /// Identifier of an emission source.
    SourceId, "SourceId"
);

uuid_id!(
    /// Identifier of an emission record.
    RecordId, "RecordId"
);

uuid_id!(
    /// Identifier of a carbon reduction target.
    TargetId, "TargetId"
);

uuid_id!(
    /// Identifier of a carbon reduction initiative.
    InitiativeId, "InitiativeId"
);

uuid_id!(
    /// Identifier of a supplier.
    SupplierId, "SupplierId"
);

uuid_id!(
    /// Identifier of a supply-chain emission entry.
    ChainRecordId, "ChainRecordId"
);

uuid_id!(
    /// Identifier of a supply-chain reduction target.
    ChainTargetId, "ChainTargetId"
);

uuid_id!(
    /// Identifier of a carbon offset certificate.
    CertificateId, "CertificateId"
);
