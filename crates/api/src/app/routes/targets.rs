use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{Datelike, TimeZone, Utc};

use climabill_emissions::summarize;
use climabill_infra::TenantStore;
use climabill_initiatives::{progress_to_target, CarbonTarget, TargetStatus};

use crate::app::dto::CreateTargetRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateTargetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:write")?;
    let tenant_id = tenant.tenant_id();

    let target = CarbonTarget::new(
        tenant_id,
        &body.name,
        body.baseline_year,
        body.target_year,
        body.baseline_emissions_kg,
        body.reduction_percentage,
        body.scope_coverage,
        Utc::now(),
    )?;

    services.targets.upsert(tenant_id, target.id, target.clone());

    Ok((StatusCode::CREATED, Json(target)))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;

    let items = services.targets.list(tenant.tenant_id());
    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}

/// Progress of every active target against current-year emissions.
pub async fn progress(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;
    let tenant_id = tenant.tenant_id();

    let now = Utc::now();
    let year = now.year();
    let year_start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();

    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);
    let current = summarize(&records, &sources, year_start, now).total_co2e_kg;

    let items: Vec<_> = services
        .targets
        .list(tenant_id)
        .into_iter()
        .filter(|t| t.status == TargetStatus::Active)
        .map(|t| progress_to_target(&t, current, year))
        .collect();

    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}
