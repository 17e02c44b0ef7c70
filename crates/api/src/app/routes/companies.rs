//! The tenant-scoped `/companies/{company_id}` subtree.
//!
//! Every route below this router has passed both the auth middleware and
//! the tenant path guard: handlers read the tenant id from the request
//! context and nowhere else.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Duration, Utc};

use climabill_compliance::compliance_dashboard;
use climabill_emissions::{summarize, top_sources, trend};
use climabill_infra::TenantStore;
use climabill_initiatives::{financial_impact, progress_to_target, TargetStatus};

use crate::app::dto::TenantDto;
use crate::app::errors::ApiError;
use crate::app::routes::{ai, compliance, emissions, initiatives, marketplace, suppliers, targets};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_company))
        .route("/dashboard", get(dashboard))
        .nest("/emissions", emissions::router())
        .route("/targets", post(targets::create).get(targets::list))
        .route("/targets/progress", get(targets::progress))
        .route(
            "/initiatives",
            post(initiatives::create).get(initiatives::list),
        )
        .route("/financial-impact", get(initiatives::financial_summary))
        .route(
            "/suppliers",
            post(suppliers::create).get(suppliers::list),
        )
        .route(
            "/supply-chain-emissions",
            post(suppliers::add_emission).get(suppliers::list_emissions),
        )
        .route("/supply-chain/dashboard", get(suppliers::dashboard))
        .route(
            "/supply-chain/targets",
            post(suppliers::create_target).get(suppliers::list_targets),
        )
        .route("/certificates", get(marketplace::list_certificates))
        .route("/compliance/dashboard", get(compliance::dashboard))
        .route("/compliance/report/:standard", get(compliance::report))
        .route("/ai/forecast", post(ai::forecast))
        .route("/ai/recommendations", post(ai::recommendations))
}

pub async fn get_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "companies:read")?;

    let record = services
        .identity
        .tenant(tenant.tenant_id())
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    Ok((StatusCode::OK, Json(TenantDto::from_tenant(&record))))
}

/// Composed dashboard: emissions summary + trend + top sources + target
/// progress + financial impact + compliance status for the tenant.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "companies:read")?;

    let tenant_id = tenant.tenant_id();
    let company = services
        .identity
        .tenant(tenant_id)
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    let now = Utc::now();
    let window_start = now - Duration::days(365);

    let records = services.records.list(tenant_id);
    let sources = services.sources.list(tenant_id);

    let summary = summarize(&records, &sources, window_start, now);
    let monthly = trend(&records, 12, now);
    let top = top_sources(&records, &sources, 5);

    let target_progress: Vec<_> = services
        .targets
        .list(tenant_id)
        .into_iter()
        .filter(|t| t.status == TargetStatus::Active)
        .map(|t| progress_to_target(&t, summary.total_co2e_kg, now.year()))
        .collect();

    let portfolio = services.initiatives.list(tenant_id);
    let impact = financial_impact(&portfolio, summary.total_co2e_kg);

    let compliance = compliance_dashboard(
        &company.name,
        &company.compliance_standards,
        summary.total_co2e_kg,
        now.year(),
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "company_id": tenant_id.to_string(),
            "period_start": window_start,
            "period_end": now,
            "emissions_summary": summary,
            "emissions_trend": monthly,
            "top_emission_sources": top,
            "target_progress": target_progress,
            "financial_impact": impact,
            "compliance_status": compliance,
        })),
    ))
}
