use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::fare::{recalculate, VehicleType};
use crate::utils::geo::GeoPoint;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaQuery {
    pub current: String,
    pub target: String,
    #[serde(default)]
    pub vehicle_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaUpdate {
    pub distance_km: f64,
    pub eta: String,
    pub vehicle_type: Option<VehicleType>,
    pub used_default_speed: bool,
    pub computed_at: DateTime<Utc>,
    pub next_poll_secs: u64,
}

/// Recalculate distance and ETA while a ride is pending pickup.
/// Polled by the rider and passenger tracking pages.
pub async fn live_eta(
    State(state): State<AppState>,
    query: Result<Query<EtaQuery>, QueryRejection>,
) -> AppResult<Json<EtaUpdate>> {
    let Query(query) = query?;
    let current: GeoPoint = query.current.parse()?;
    let target: GeoPoint = query.target.parse()?;

    let estimate = recalculate(&current, &target, &query.vehicle_type);
    if estimate.vehicle_type.is_none() {
        tracing::debug!(
            vehicle_type = %query.vehicle_type,
            "Unknown vehicle type, using default tracking speed"
        );
    }

    Ok(Json(EtaUpdate {
        distance_km: estimate.distance_km,
        eta: estimate.eta,
        vehicle_type: estimate.vehicle_type,
        used_default_speed: estimate.vehicle_type.is_none(),
        computed_at: Utc::now(),
        next_poll_secs: state.config.tracking_poll_secs,
    }))
}
