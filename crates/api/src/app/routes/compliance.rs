use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, TimeZone, Utc};

use climabill_compliance::{compliance_dashboard, generate_report, standards_catalog};
use climabill_core::ComplianceStandard;
use climabill_emissions::summarize;
use climabill_infra::TenantStore;

use crate::app::dto::ReportQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub async fn standards() -> impl IntoResponse {
    Json(serde_json::json!({ "standards": standards_catalog() }))
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "compliance:read")?;
    let tenant_id = tenant.tenant_id();

    let company = services
        .identity
        .tenant(tenant_id)
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    let now = Utc::now();
    let year_start = Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).unwrap();

    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);
    let total = summarize(&records, &sources, year_start, now).total_co2e_kg;

    Ok((
        StatusCode::OK,
        Json(compliance_dashboard(
            &company.name,
            &company.compliance_standards,
            total,
            now.year(),
        )),
    ))
}

pub async fn report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(params): Path<std::collections::HashMap<String, String>>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "compliance:read")?;
    let tenant_id = tenant.tenant_id();

    let standard: ComplianceStandard = params
        .get("standard")
        .ok_or_else(|| ApiError::validation("missing standard"))?
        .parse()?;

    let company = services
        .identity
        .tenant(tenant_id)
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    let now = Utc::now();
    let year = query.year.unwrap_or(now.year());
    let year_start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| ApiError::validation("invalid year"))?;
    let year_end = Utc
        .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .ok_or_else(|| ApiError::validation("invalid year"))?;

    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);
    let scope_breakdown = summarize(&records, &sources, year_start, year_end).scope_breakdown;

    let targets = services.targets.list(tenant_id);
    let initiatives = services.initiatives.list(tenant_id);

    Ok((
        StatusCode::OK,
        Json(generate_report(
            standard,
            &company.name,
            company.employee_count,
            scope_breakdown,
            &targets,
            &initiatives,
            year,
            now,
        )),
    ))
}
