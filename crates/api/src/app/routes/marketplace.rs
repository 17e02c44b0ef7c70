//! Marketplace routes.
//!
//! The listing catalog is global; ownership is tenant-scoped from purchase
//! onward. `/verify/{code}` is intentionally cross-tenant — it answers
//! "is this certificate genuine and unretired" and nothing about the owner.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use climabill_infra::TenantStore;
use climabill_marketplace::{verify_certificate, CarbonCertificate, ListingFilter};

use crate::app::dto::{PurchaseRequest, RetireRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/projects", get(projects))
        .route("/purchase", post(purchase))
        .route("/retire", post(retire))
        .route("/verify/:code", get(verify))
}

pub async fn projects(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(filter): Query<ListingFilter>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "marketplace:read")?;

    let catalog = services
        .marketplace
        .read()
        .map_err(|_| ApiError::internal("marketplace catalog lock poisoned"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "projects": catalog.list(&filter) })),
    ))
}

pub async fn purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "marketplace:write")?;
    let tenant_id = tenant.tenant_id();

    let purchase = {
        let mut catalog = services
            .marketplace
            .write()
            .map_err(|_| ApiError::internal("marketplace catalog lock poisoned"))?;
        catalog.purchase(&body.listing_id, body.credits_amount)?
    };

    let certificate = CarbonCertificate::issue(tenant_id, &purchase, Utc::now());
    services.store_certificate(certificate.clone());

    tracing::info!(
        tenant_id = %tenant_id,
        listing_id = %purchase.listing_id,
        credits = purchase.credits_purchased,
        "carbon credits purchased"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "purchase": purchase,
            "certificate": certificate,
        })),
    ))
}

pub async fn retire(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<RetireRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "marketplace:write")?;
    let tenant_id = tenant.tenant_id();

    // Only certificates owned by the caller's tenant are retirable; a
    // foreign code is simply not found.
    let mut certificate = services
        .certificates
        .list(tenant_id)
        .into_iter()
        .find(|c| c.certificate_code == body.certificate_code)
        .ok_or_else(|| ApiError::not_found("certificate not found"))?;

    certificate.retire(&body.reason, Utc::now())?;
    services.store_certificate(certificate.clone());

    Ok((StatusCode::OK, Json(certificate)))
}

pub async fn verify(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let found = services.certificate_by_code(&code);
    Ok((
        StatusCode::OK,
        Json(verify_certificate(&code, found.as_ref())),
    ))
}

/// `GET /companies/{company_id}/certificates` — tenant-owned certificates.
pub async fn list_certificates(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require(&tenant, &principal, "marketplace:read")?;

    let items = services.certificates.list(tenant.tenant_id());
    Ok((StatusCode::OK, Json(serde_json::json!({ "items": items }))))
}
