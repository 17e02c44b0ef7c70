//! The user account record.
//!
//! # Invariants
//! - A user belongs to exactly one tenant (`tenant_id` is immutable).
//! - The password hash never leaves this type in serialized form.
//! - Email is normalized (trimmed, lowercased) at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, TenantId, UserId};

use crate::password;
use crate::roles::Role;

/// A user identity within a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub email: String,
    /// Argon2id PHC string. Excluded from serialization so no response or
    /// log sink can ever carry it.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Create a user with a freshly hashed password.
    pub fn new(
        tenant_id: TenantId,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let email = email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        if password.len() < 8 {
            return Err(DomainError::validation(
                "password must be at least 8 characters",
            ));
        }
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let password_hash = password::hash_password(password)
            .map_err(|e| DomainError::invariant(e.to_string()))?;

        Ok(Self {
            id: UserId::new(),
            tenant_id,
            email,
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role,
            is_active: true,
            created_at,
            last_login: None,
        })
    }

    /// Constant-shape password check: verifies the supplied password against
    /// the stored hash. Suspended accounts never authenticate.
    pub fn check_password(&self, password: &str) -> bool {
        if !self.is_active {
            return false;
        }
        password::verify_password(password, &self.password_hash).unwrap_or(false)
    }
}
