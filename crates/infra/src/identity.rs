//! The identity directory: tenants and their users.
//!
//! Registration is the one place the platform must create two records
//! atomically (tenant + first user). Both maps live behind a single lock,
//! and every validation runs before either insert — a failed registration
//! leaves no partial tenant behind.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;

use climabill_auth::UserAccount;
use climabill_core::{Tenant, TenantId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("email is already registered")]
    EmailTaken,

    #[error("not found")]
    NotFound,

    #[error("user does not belong to the tenant being registered")]
    TenantMismatch,
}

#[derive(Debug, Default)]
struct Directory {
    tenants: HashMap<TenantId, Tenant>,
    users: HashMap<UserId, UserAccount>,
    users_by_email: HashMap<String, UserId>,
}

/// In-memory identity directory.
#[derive(Debug, Default)]
pub struct IdentityStore {
    inner: RwLock<Directory>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tenant together with its first user — both or neither.
    pub fn register(&self, tenant: Tenant, user: UserAccount) -> Result<(), IdentityError> {
        if user.tenant_id != tenant.id {
            return Err(IdentityError::TenantMismatch);
        }

        let mut dir = self.inner.write().expect("identity directory poisoned");
        if dir.users_by_email.contains_key(&user.email) {
            return Err(IdentityError::EmailTaken);
        }

        dir.users_by_email.insert(user.email.clone(), user.id);
        dir.users.insert(user.id, user);
        dir.tenants.insert(tenant.id, tenant);
        Ok(())
    }

    /// Add a user to an existing tenant.
    pub fn add_user(&self, user: UserAccount) -> Result<(), IdentityError> {
        let mut dir = self.inner.write().expect("identity directory poisoned");
        if !dir.tenants.contains_key(&user.tenant_id) {
            return Err(IdentityError::NotFound);
        }
        if dir.users_by_email.contains_key(&user.email) {
            return Err(IdentityError::EmailTaken);
        }

        dir.users_by_email.insert(user.email.clone(), user.id);
        dir.users.insert(user.id, user);
        Ok(())
    }

    /// Look up an active user by (normalized) email.
    pub fn find_user_by_email(&self, email: &str) -> Option<UserAccount> {
        let email = email.trim().to_ascii_lowercase();
        let dir = self.inner.read().ok()?;
        let id = dir.users_by_email.get(&email)?;
        dir.users.get(id).filter(|u| u.is_active).cloned()
    }

    pub fn user(&self, id: UserId) -> Option<UserAccount> {
        let dir = self.inner.read().ok()?;
        dir.users.get(&id).cloned()
    }

    /// Look up an active tenant.
    pub fn tenant(&self, id: TenantId) -> Option<Tenant> {
        let dir = self.inner.read().ok()?;
        dir.tenants.get(&id).filter(|t| t.is_active).cloned()
    }

    pub fn record_login(&self, user_id: UserId, at: DateTime<Utc>) {
        if let Ok(mut dir) = self.inner.write() {
            if let Some(user) = dir.users.get_mut(&user_id) {
                user.last_login = Some(at);
            }
        }
    }

    pub fn user_count(&self, tenant_id: TenantId) -> usize {
        match self.inner.read() {
            Ok(dir) => dir
                .users
                .values()
                .filter(|u| u.tenant_id == tenant_id && u.is_active)
                .count(),
            Err(_) => 0,
        }
    }

    pub fn tenant_count(&self) -> usize {
        self.inner.read().map(|dir| dir.tenants.len()).unwrap_or(0)
    }
}
