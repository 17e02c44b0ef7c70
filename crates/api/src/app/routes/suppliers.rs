use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use climabill_infra::TenantStore;
use climabill_suppliers::{
    supply_chain_dashboard, Supplier, SupplyChainEmission, SupplyChainTarget,
};

use crate::app::dto::{
    CreateChainEmissionRequest, CreateChainTargetRequest, CreateSupplierRequest,
};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:write")?;
    let tenant_id = tenant.tenant_id();

    let supplier = Supplier::new(
        tenant_id,
        &body.name,
        &body.industry,
        &body.location,
        &body.contact_email,
        body.annual_revenue_usd,
        body.employee_count,
        body.carbon_score,
        body.partnership_level.unwrap_or_default(),
        Utc::now(),
    )?;

    services
        .suppliers
        .upsert(tenant_id, supplier.id, supplier.clone());

    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:read")?;

    let items = services.suppliers.list(tenant.tenant_id());
    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}

pub async fn add_emission(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateChainEmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:write")?;
    let tenant_id = tenant.tenant_id();

    // The supplier must belong to this tenant; the tenant-keyed store makes
    // a foreign supplier indistinguishable from a missing one.
    services
        .suppliers
        .get(tenant_id, &body.supplier_id)
        .ok_or_else(|| ApiError::not_found("supplier not found"))?;

    let emission = SupplyChainEmission::new(
        tenant_id,
        body.supplier_id,
        body.direction,
        body.scope,
        body.co2e_kg,
        &body.activity_description,
        body.period_start,
        body.period_end,
        body.data_quality.unwrap_or_default(),
        body.verification_level.unwrap_or_default(),
        Utc::now(),
    )?;

    services
        .chain_emissions
        .upsert(tenant_id, emission.id, emission.clone());

    Ok((StatusCode::CREATED, Json(emission)))
}

pub async fn list_emissions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:read")?;

    let items = services.chain_emissions.list(tenant.tenant_id());
    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:read")?;
    let tenant_id = tenant.tenant_id();

    let suppliers = services.suppliers.list(tenant_id);
    let emissions = services.chain_emissions.list(tenant_id);

    Ok((
        StatusCode::OK,
        Json(supply_chain_dashboard(&suppliers, &emissions)),
    ))
}

pub async fn create_target(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateChainTargetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:write")?;
    let tenant_id = tenant.tenant_id();

    // Participating suppliers must all belong to this tenant.
    for supplier_id in &body.participating_suppliers {
        services
            .suppliers
            .get(tenant_id, supplier_id)
            .ok_or_else(|| ApiError::not_found("supplier not found"))?;
    }

    let target = SupplyChainTarget::new(
        tenant_id,
        &body.name,
        body.baseline_year,
        body.target_year,
        body.reduction_percentage,
        body.scope_coverage,
        body.participating_suppliers,
        Utc::now(),
    )?;

    services
        .chain_targets
        .upsert(tenant_id, target.id, target.clone());

    Ok((StatusCode::CREATED, Json(target)))
}

pub async fn list_targets(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "supply_chain:read")?;

    let items = services.chain_targets.list(tenant.tenant_id());
    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}
