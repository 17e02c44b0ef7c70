//! Stateless calculator endpoints.

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};

use climabill_emissions::calculator;

use crate::app::dto::{ElectricityCalcRequest, FuelCalcRequest, TravelCalcRequest};
use crate::app::errors::ApiError;
use crate::context::TenantContext;

pub fn router() -> Router {
    Router::new()
        .route("/electricity", post(electricity))
        .route("/fuel", post(fuel))
        .route("/travel", post(travel))
}

pub async fn electricity(
    Extension(_tenant): Extension<TenantContext>,
    Json(body): Json<ElectricityCalcRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !(0.0..=100.0).contains(&body.renewable_percentage) {
        return Err(ApiError::validation(
            "renewable_percentage must be between 0 and 100",
        ));
    }

    let result = calculator::electricity(
        body.kwh_consumed,
        body.region,
        body.renewable_percentage / 100.0,
    )?;

    Ok((StatusCode::OK, Json(result)))
}

pub async fn fuel(
    Extension(_tenant): Extension<TenantContext>,
    Json(body): Json<FuelCalcRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = calculator::fuel(body.fuel_type, body.quantity, body.unit)?;
    Ok((StatusCode::OK, Json(result)))
}

pub async fn travel(
    Extension(_tenant): Extension<TenantContext>,
    Json(body): Json<TravelCalcRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = calculator::travel(&body.trips)?;
    Ok((StatusCode::OK, Json(result)))
}
