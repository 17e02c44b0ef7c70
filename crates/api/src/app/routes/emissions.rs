use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};

use climabill_emissions::{summarize, top_sources, trend, EmissionRecord, EmissionSource};
use climabill_infra::TenantStore;

use crate::app::dto::{
    CreateEmissionRecordRequest, CreateSourceRequest, SummaryQuery, TopSourcesQuery, TrendQuery,
};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_record).get(list_records))
        .route("/summary", get(summary))
        .route("/trend", get(trend_handler))
        .route("/sources", post(create_source).get(list_sources))
        .route("/sources/top", get(top))
}

pub async fn create_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateEmissionRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:write")?;
    let tenant_id = tenant.tenant_id();

    // The source must exist within this tenant; a foreign or unknown id is
    // indistinguishable (the store is keyed by the caller's tenant).
    services
        .sources
        .get(tenant_id, &body.source_id)
        .ok_or_else(|| ApiError::not_found("emission source not found"))?;

    let record = EmissionRecord::from_activity(
        tenant_id,
        body.source_id,
        body.period_start,
        body.period_end,
        body.activity,
        body.co2e_kg,
        body.emission_factor,
        body.data_quality,
        Utc::now(),
    )?;

    services.records.upsert(tenant_id, record.id, record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_records(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;

    let items = services.records.list(tenant.tenant_id());
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "items": items })),
    ))
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;
    let tenant_id = tenant.tenant_id();

    let end = query.end_date.unwrap_or_else(Utc::now);
    let start = query.start_date.unwrap_or(end - Duration::days(365));
    if end <= start {
        return Err(ApiError::validation("end_date must come after start_date"));
    }

    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);

    Ok((StatusCode::OK, Json(summarize(&records, &sources, start, end))))
}

pub async fn trend_handler(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<TrendQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;

    let months = query.months.unwrap_or(12);
    let records = services.records.list(tenant.tenant_id());

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "months": trend(&records, months, Utc::now()) })),
    ))
}

pub async fn create_source(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateSourceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:write")?;
    let tenant_id = tenant.tenant_id();

    let source = EmissionSource::new(
        tenant_id,
        &body.name,
        body.category,
        body.scope,
        body.description,
    )?;

    services.sources.upsert(tenant_id, source.id, source.clone());

    Ok((StatusCode::CREATED, Json(source)))
}

pub async fn list_sources(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;

    let items = services.sources.list(tenant.tenant_id());
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "items": items })),
    ))
}

pub async fn top(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<TopSourcesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "emissions:read")?;
    let tenant_id = tenant.tenant_id();

    let limit = query.limit.unwrap_or(5);
    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "items": top_sources(&records, &sources, limit) })),
    ))
}
