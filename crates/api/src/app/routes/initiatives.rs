use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{Datelike, TimeZone, Utc};

use climabill_emissions::summarize;
use climabill_infra::TenantStore;
use climabill_initiatives::{financial_impact, ReductionInitiative};

use crate::app::dto::CreateInitiativeRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateInitiativeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "companies:write")?;
    let tenant_id = tenant.tenant_id();

    let initiative = ReductionInitiative::new(
        tenant_id,
        &body.name,
        &body.description,
        body.implementation_cost_usd,
        body.annual_savings_usd,
        body.annual_co2e_reduction_kg,
        body.implementation_date,
        body.status.unwrap_or_default(),
        Utc::now(),
    )?;

    services
        .initiatives
        .upsert(tenant_id, initiative.id, initiative.clone());

    Ok((StatusCode::CREATED, Json(initiative)))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "companies:read")?;

    let items = services.initiatives.list(tenant.tenant_id());
    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}

/// Investment/savings/ROI/payback over the portfolio plus the carbon cost
/// of this year's emissions.
pub async fn financial_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "companies:read")?;
    let tenant_id = tenant.tenant_id();

    let now = Utc::now();
    let year_start = Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).unwrap();

    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);
    let current = summarize(&records, &sources, year_start, now).total_co2e_kg;

    let portfolio = services.initiatives.list(tenant_id);

    Ok((
        StatusCode::OK,
        Json(financial_impact(&portfolio, current)),
    ))
}
