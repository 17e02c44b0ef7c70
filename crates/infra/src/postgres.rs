//! Postgres-backed record storage (behind the `postgres` feature).
//!
//! Records are stored as JSONB payloads keyed by `(tenant_id, id)`, so the
//! tenant id is part of the primary key and every query carries it in the
//! WHERE clause — the same isolation shape as the in-memory store.
//!
//! The `TenantStore` trait is synchronous; queries run via
//! `Handle::block_on`, which confines this store to contexts with a Tokio
//! runtime (the API server and integration tests both qualify).

use std::sync::Arc;

use sqlx::{PgPool, Row};

use climabill_core::{RecordId, TenantId};
use climabill_emissions::EmissionRecord;

use crate::store::TenantStore;

/// Expected schema:
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS emission_records (
///     tenant_id UUID NOT NULL,
///     id        UUID NOT NULL,
///     payload   JSONB NOT NULL,
///     PRIMARY KEY (tenant_id, id)
/// );
/// ```
pub struct PgEmissionRecordStore {
    pool: Arc<PgPool>,
}

impl PgEmissionRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

impl TenantStore<RecordId, EmissionRecord> for PgEmissionRecordStore {
    fn get(&self, tenant_id: TenantId, key: &RecordId) -> Option<EmissionRecord> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let pool = self.pool.clone();
        let tenant = *tenant_id.as_uuid();
        let id = *key.as_uuid();

        handle.block_on(async move {
            let row = sqlx::query(
                "SELECT payload FROM emission_records WHERE tenant_id = $1 AND id = $2",
            )
            .bind(tenant)
            .bind(id)
            .fetch_optional(&*pool)
            .await
            .ok()??;

            let payload: serde_json::Value = row.try_get("payload").ok()?;
            serde_json::from_value(payload).ok()
        })
    }

    fn upsert(&self, tenant_id: TenantId, key: RecordId, value: EmissionRecord) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => return,
        };
        let pool = self.pool.clone();
        let tenant = *tenant_id.as_uuid();
        let id = *key.as_uuid();

        let payload = match serde_json::to_value(&value) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("emission record serialization failed: {e}");
                return;
            }
        };

        handle.block_on(async move {
            let result = sqlx::query(
                "INSERT INTO emission_records (tenant_id, id, payload) VALUES ($1, $2, $3) \
                 ON CONFLICT (tenant_id, id) DO UPDATE SET payload = EXCLUDED.payload",
            )
            .bind(tenant)
            .bind(id)
            .bind(payload)
            .execute(&*pool)
            .await;

            if let Err(e) = result {
                tracing::error!("emission record upsert failed: {e}");
            }
        });
    }

    fn list(&self, tenant_id: TenantId) -> Vec<EmissionRecord> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => return Vec::new(),
        };
        let pool = self.pool.clone();
        let tenant = *tenant_id.as_uuid();

        handle.block_on(async move {
            let rows = sqlx::query(
                "SELECT payload FROM emission_records WHERE tenant_id = $1 ORDER BY id",
            )
            .bind(tenant)
            .fetch_all(&*pool)
            .await
            .unwrap_or_default();

            rows.into_iter()
                .filter_map(|row| {
                    let payload: serde_json::Value = row.try_get("payload").ok()?;
                    serde_json::from_value(payload).ok()
                })
                .collect()
        })
    }

    fn count(&self, tenant_id: TenantId) -> usize {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => return 0,
        };
        let pool = self.pool.clone();
        let tenant = *tenant_id.as_uuid();

        handle.block_on(async move {
            sqlx::query("SELECT COUNT(*) AS n FROM emission_records WHERE tenant_id = $1")
                .bind(tenant)
                .fetch_one(&*pool)
                .await
                .ok()
                .and_then(|row| row.try_get::<i64, _>("n").ok())
                .unwrap_or(0) as usize
        })
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => return,
        };
        let pool = self.pool.clone();
        let tenant = *tenant_id.as_uuid();

        handle.block_on(async move {
            let result = sqlx::query("DELETE FROM emission_records WHERE tenant_id = $1")
                .bind(tenant)
                .execute(&*pool)
                .await;

            if let Err(e) = result {
                tracing::error!("emission record clear failed: {e}");
            }
        });
    }
}
