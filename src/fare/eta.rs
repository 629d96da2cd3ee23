use crate::fare::vehicle::{VehicleType, DEFAULT_TRACKING_SPEED_KMH};
use crate::utils::geo::{haversine_distance, GeoPoint};

/// Live distance and ETA between a moving vehicle and its target.
#[derive(Debug, Clone, PartialEq)]
pub struct EtaEstimate {
    pub distance_km: f64,
    pub eta: String,
    /// `None` when the vehicle type was not recognised and the default speed was used.
    pub vehicle_type: Option<VehicleType>,
}

/// Formats a whole number of minutes as `"45 min"`, `"2h"` or `"1h 30m"`.
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rest)
    }
}

/// Travel time in whole minutes, rounded to the nearest minute.
pub(crate) fn travel_minutes(distance_km: f64, speed_kmh: f64) -> u64 {
    if distance_km <= 0.0 || speed_kmh <= 0.0 {
        return 0;
    }
    (distance_km / speed_kmh * 60.0).round() as u64
}

/// Recalculates distance and ETA for a ride pending pickup.
///
/// Unknown vehicle types do not fail: this runs on every location tick, so it
/// falls back to [`DEFAULT_TRACKING_SPEED_KMH`] instead.
pub fn recalculate(current: &GeoPoint, target: &GeoPoint, vehicle_type: &str) -> EtaEstimate {
    match VehicleType::parse_lenient(vehicle_type) {
        Some(vt) => recalculate_for(current, target, vt),
        None => estimate_with_speed(current, target, DEFAULT_TRACKING_SPEED_KMH, None),
    }
}

pub fn recalculate_for(current: &GeoPoint, target: &GeoPoint, vehicle_type: VehicleType) -> EtaEstimate {
    estimate_with_speed(
        current,
        target,
        vehicle_type.tracking_avg_speed_kmh(),
        Some(vehicle_type),
    )
}

fn estimate_with_speed(
    current: &GeoPoint,
    target: &GeoPoint,
    speed_kmh: f64,
    vehicle_type: Option<VehicleType>,
) -> EtaEstimate {
    let distance_km = haversine_distance(current, target);

    EtaEstimate {
        distance_km,
        eta: format_duration(travel_minutes(distance_km, speed_kmh)),
        vehicle_type,
    }
}
