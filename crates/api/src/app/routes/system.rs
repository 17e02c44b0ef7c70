use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use climabill_core::Industry;
use climabill_emissions::calculator;

use crate::app::dto::BenchmarkQuery;
use crate::app::errors::ApiError;
use crate::context::{PrincipalContext, TenantContext};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

pub async fn whoami(
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "tenant_id": tenant.tenant_id().to_string(),
        "user_id": principal.user_id().to_string(),
        "role": principal.role().as_str(),
    }))
}

pub async fn benchmark(
    Path(industry): Path<String>,
    Query(query): Query<BenchmarkQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let industry: Industry = industry.parse()?;
    let benchmark = calculator::industry_benchmark(industry, query.employee_count);
    Ok((StatusCode::OK, Json(benchmark)))
}
