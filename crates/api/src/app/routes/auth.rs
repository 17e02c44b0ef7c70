//! Registration and login.
//!
//! Both endpoints sit outside the auth middleware. Login failures are
//! deliberately indistinguishable: unknown email and wrong password return
//! the same status, kind and message.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use climabill_auth::{Role, UserAccount};
use climabill_core::Tenant;
use climabill_emissions::default_sources_for_industry;
use climabill_infra::TenantStore;

use crate::app::dto::{LoginRequest, RegisterRequest, TenantDto, UserDto};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();

    // Validate everything before touching the directory: tenant + user are
    // created together or not at all.
    let tenant = Tenant::new(body.company.into_profile(), now)?;
    let user = UserAccount::new(
        tenant.id,
        &body.email,
        &body.password,
        &body.first_name,
        &body.last_name,
        Role::Admin,
        now,
    )?;

    let user_id = user.id;
    services.identity.register(tenant.clone(), user.clone())?;

    // Seed the industry's default emission sources for the new tenant.
    for source in default_sources_for_industry(tenant.id, tenant.industry) {
        services.sources.upsert(tenant.id, source.id, source);
    }

    let token = services
        .token_service()
        .issue(user_id, tenant.id, Role::Admin)?;

    tracing::info!(tenant_id = %tenant.id, "tenant registered");

    let tenant_dto = TenantDto::from_tenant(&tenant);
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "user": UserDto::from_account(&user),
            "tenant": tenant_dto,
            "company": TenantDto::from_tenant(&tenant),
        })),
    ))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = services
        .identity
        .find_user_by_email(&body.email)
        .ok_or_else(ApiError::unauthenticated)?;

    if !user.check_password(&body.password) {
        return Err(ApiError::unauthenticated());
    }

    let tenant = services
        .identity
        .tenant(user.tenant_id)
        .ok_or_else(ApiError::unauthenticated)?;

    services.identity.record_login(user.id, Utc::now());

    let token = services
        .token_service()
        .issue(user.id, tenant.id, user.role)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "user": UserDto::from_account(&user),
            "tenant": TenantDto::from_tenant(&tenant),
        })),
    ))
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    let user = services
        .identity
        .user(principal.user_id())
        .ok_or_else(ApiError::unauthenticated)?;
    let tenant = services
        .identity
        .tenant(tenant.tenant_id())
        .ok_or_else(ApiError::unauthenticated)?;

    Ok(Json(serde_json::json!({
        "user": UserDto::from_account(&user),
        "tenant": TenantDto::from_tenant(&tenant),
    })))
}
