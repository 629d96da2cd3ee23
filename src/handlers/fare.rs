use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::error::AppResult;
use crate::fare::{FareBreakdown, Tariff, VehicleType};
use crate::utils::geo::GeoPoint;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    // Validated by GeoPoint so bad coordinates report INVALID_LOCATION
    #[serde(default)]
    pub pickup: Value,
    #[serde(default)]
    pub drop: Value,
    pub vehicle_type: String,
    pub promo_code: Option<String>,
}

/// Query-string form: `?pickup=lat,lng&drop=lat,lng&vehicleType=Car&promoCode=X`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateQuery {
    pub pickup: String,
    pub drop: String,
    pub vehicle_type: String,
    pub promo_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    pub vehicle_type: VehicleType,
    pub tariff: Tariff,
    pub booking_avg_speed_kmh: f64,
    pub tracking_avg_speed_kmh: f64,
}

/// Quote a ride from a JSON body
pub async fn estimate_fare(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> AppResult<Json<FareBreakdown>> {
    let Json(payload) = payload?;
    let pickup = GeoPoint::try_from(&payload.pickup)?;
    let drop = GeoPoint::try_from(&payload.drop)?;

    quote(
        &state,
        &pickup,
        &drop,
        &payload.vehicle_type,
        payload.promo_code.as_deref(),
    )
}

/// Quote a ride from query-string parameters
pub async fn estimate_fare_query(
    State(state): State<AppState>,
    query: Result<Query<EstimateQuery>, QueryRejection>,
) -> AppResult<Json<FareBreakdown>> {
    let Query(query) = query?;
    let pickup: GeoPoint = query.pickup.parse()?;
    let drop: GeoPoint = query.drop.parse()?;

    quote(
        &state,
        &pickup,
        &drop,
        &query.vehicle_type,
        query.promo_code.as_deref(),
    )
}

fn quote(
    state: &AppState,
    pickup: &GeoPoint,
    drop: &GeoPoint,
    vehicle_type: &str,
    promo_code: Option<&str>,
) -> AppResult<Json<FareBreakdown>> {
    let fare = state
        .estimator
        .estimate(pickup, drop, vehicle_type, promo_code)
        .inspect_err(|e| tracing::debug!(error = %e, vehicle_type, "Fare estimate rejected"))?;

    tracing::debug!(
        %pickup,
        %drop,
        vehicle_type,
        distance_km = fare.distance_km,
        cost = fare.cost,
        promo = ?fare.promo_applied,
        "Fare estimated"
    );

    Ok(Json(fare))
}

/// List vehicle types with their tariffs and speed tables
pub async fn list_vehicles() -> Json<Vec<VehicleInfo>> {
    let vehicles = VehicleType::iter()
        .map(|vt| VehicleInfo {
            vehicle_type: vt,
            tariff: vt.tariff(),
            booking_avg_speed_kmh: vt.booking_avg_speed_kmh(),
            tracking_avg_speed_kmh: vt.tracking_avg_speed_kmh(),
        })
        .collect();

    Json(vehicles)
}
