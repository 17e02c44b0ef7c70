use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};

use climabill_ai::{forecast_emissions, recommend_initiatives};
use climabill_emissions::summarize;
use climabill_infra::TenantStore;

use crate::app::dto::ForecastQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub async fn forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<ForecastQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;
    let tenant_id = tenant.tenant_id();

    let horizon = query.horizon_months.unwrap_or(12);
    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);

    let forecast = forecast_emissions(&records, &sources, horizon, Utc::now())?;

    Ok((StatusCode::OK, Json(forecast)))
}

pub async fn recommendations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;
    let tenant_id = tenant.tenant_id();

    let company = services
        .identity
        .tenant(tenant_id)
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    let now = Utc::now();
    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);
    let summary = summarize(&records, &sources, now - Duration::days(365), now);

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "recommendations": recommend_initiatives(company.industry, &summary.scope_breakdown),
        })),
    ))
}
