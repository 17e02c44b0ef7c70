//! Tenant-isolated key/value storage.
//!
//! Every key is compound: `(TenantId, K)`. There is no way to read or write
//! a value without naming a tenant, which is how cross-tenant access stays
//! architecturally impossible at this layer — handlers pass the tenant id
//! the authorizer resolved, never one a client supplied.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use climabill_core::TenantId;

/// Tenant-isolated store abstraction for domain records.
pub trait TenantStore<K, V>: Send + Sync {
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V>;
    fn upsert(&self, tenant_id: TenantId, key: K, value: V);
    fn list(&self, tenant_id: TenantId) -> Vec<V>;
    fn count(&self, tenant_id: TenantId) -> usize;
    /// Drop every record a tenant owns (offboarding support).
    fn clear_tenant(&self, tenant_id: TenantId);
}

impl<K, V, S> TenantStore<K, V> for Arc<S>
where
    S: TenantStore<K, V> + ?Sized,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        (**self).get(tenant_id, key)
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) {
        (**self).upsert(tenant_id, key, value)
    }

    fn list(&self, tenant_id: TenantId) -> Vec<V> {
        (**self).list(tenant_id)
    }

    fn count(&self, tenant_id: TenantId) -> usize {
        (**self).count(tenant_id)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        (**self).clear_tenant(tenant_id)
    }
}

/// In-memory tenant store (dev/test and the default runtime).
///
/// Last write wins within a tenant; concurrent writers to the same record
/// are not coordinated beyond the map lock, which matches the storage
/// semantics the platform promises.
#[derive(Debug)]
pub struct InMemoryTenantStore<K, V> {
    inner: RwLock<HashMap<(TenantId, K), V>>,
}

impl<K, V> InMemoryTenantStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryTenantStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TenantStore<K, V> for InMemoryTenantStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(&(tenant_id, key.clone())).cloned()
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert((tenant_id, key), value);
        }
    }

    fn list(&self, tenant_id: TenantId) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return Vec::new(),
        };

        map.iter()
            .filter_map(|((t, _k), v)| (*t == tenant_id).then(|| v.clone()))
            .collect()
    }

    fn count(&self, tenant_id: TenantId) -> usize {
        match self.inner.read() {
            Ok(map) => map.keys().filter(|(t, _)| *t == tenant_id).count(),
            Err(_) => 0,
        }
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|(t, _k), _v| *t != tenant_id);
        }
    }
}
