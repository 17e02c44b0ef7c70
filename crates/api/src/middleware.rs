//! Request authorization middleware.
//!
//! Two layers, applied at different depths of the router:
//!
//! 1. `auth_middleware` wraps every protected route: it extracts the bearer
//!    credential, verifies it, and attaches [`TenantContext`] /
//!    [`PrincipalContext`] to the request.
//! 2. `tenant_path_guard` wraps the `/companies/{company_id}` subtree: it
//!    treats the path id as a *claim* and rejects it with 403 when it does
//!    not match the authenticated tenant. The id is never looked up, so the
//!    check reveals nothing about any resource.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};

use climabill_auth::TokenService;
use climabill_core::TenantId;

use crate::app::errors::ApiError;
use crate::context::{PrincipalContext, TenantContext};

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state.tokens.verify(token).map_err(|_| {
        tracing::warn!("rejected request with invalid credential");
        ApiError::unauthenticated()
    })?;

    req.extensions_mut()
        .insert(TenantContext::new(claims.tenant_id));
    req.extensions_mut()
        .insert(PrincipalContext::new(claims.sub, claims.role));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(ApiError::unauthenticated)?;

    let header = header.to_str().map_err(|_| ApiError::unauthenticated())?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(ApiError::unauthenticated)?
        .trim();

    if token.is_empty() {
        return Err(ApiError::unauthenticated());
    }

    Ok(token)
}

/// Cross-tenant isolation guard for `/companies/{company_id}/…` paths.
pub async fn tenant_path_guard(
    Extension(tenant): Extension<TenantContext>,
    Path(params): Path<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claimed = params
        .get("company_id")
        .ok_or_else(|| ApiError::internal("tenant guard applied to a path without company_id"))?;

    let claimed: TenantId = claimed
        .parse()
        .map_err(|_| ApiError::validation("invalid company id"))?;

    if claimed != tenant.tenant_id() {
        tracing::warn!(
            tenant_id = %tenant.tenant_id(),
            claimed = %claimed,
            "cross-tenant access attempt rejected"
        );
        return Err(ApiError::forbidden(
            "company does not belong to the authenticated tenant",
        ));
    }

    Ok(next.run(req).await)
}
