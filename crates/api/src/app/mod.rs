//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store wiring (identity, tenant-keyed stores, catalog)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(AppServices::new(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState {
        tokens: services.token_service(),
    };

    // The companies subtree additionally passes the tenant path guard:
    // {company_id} must equal the token's tenant.
    let company_routes = routes::companies::router()
        .layer(axum::middleware::from_fn(middleware::tenant_path_guard));

    // Protected routes: require auth; tenant context comes from the token.
    let protected = Router::new()
        .route("/whoami", get(routes::system::whoami))
        .route("/auth/me", get(routes::auth::me))
        .route("/benchmarks/:industry", get(routes::system::benchmark))
        .route("/compliance/standards", get(routes::compliance::standards))
        .nest("/marketplace", routes::marketplace::router())
        .nest("/calculate", routes::calculate::router())
        .nest("/companies/:company_id", company_routes)
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    // Registration and login are exempt from authentication: no credential
    // exists yet.
    let public = Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .layer(Extension(services));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(ServiceBuilder::new())
}
