use std::str::FromStr;

use serde::Serialize;
use strum_macros::{EnumIter, EnumString};

use crate::error::FareError;

/// Speed assumed by the tracking recalculator when the vehicle type is not recognised.
pub const DEFAULT_TRACKING_SPEED_KMH: f64 = 30.0;

#[derive(Debug, Clone, Copy, EnumString, EnumIter, Serialize, Eq, Hash, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum VehicleType {
    Bike,
    Car,
    Cng,
}

/// Per-vehicle pricing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
}

impl VehicleType {
    /// Used by the booking form: anything outside the closed set is an error.
    pub fn parse_strict(raw: &str) -> Result<Self, FareError> {
        VehicleType::from_str(raw.trim())
            .map_err(|_| FareError::UnsupportedVehicleType(raw.to_string()))
    }

    /// Used by the live tracking loop: unknown input yields `None` and the
    /// caller falls back to [`DEFAULT_TRACKING_SPEED_KMH`].
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        VehicleType::from_str(raw.trim()).ok()
    }

    pub fn tariff(&self) -> Tariff {
        match self {
            VehicleType::Bike => Tariff {
                base_fare: 20.0,
                per_km_rate: 12.0,
                per_minute_rate: 1.0,
            },
            VehicleType::Car => Tariff {
                base_fare: 50.0,
                per_km_rate: 25.0,
                per_minute_rate: 2.0,
            },
            VehicleType::Cng => Tariff {
                base_fare: 30.0,
                per_km_rate: 18.0,
                per_minute_rate: 1.5,
            },
        }
    }

    /// Average trip speed assumed when quoting a fare at booking time.
    pub fn booking_avg_speed_kmh(&self) -> f64 {
        match self {
            VehicleType::Bike => 25.0,
            VehicleType::Car => 30.0,
            VehicleType::Cng => 20.0,
        }
    }

    /// Average speed assumed while a ride is pending pickup.
    // TODO: reconcile with booking_avg_speed_kmh once product settles on one set of figures.
    pub fn tracking_avg_speed_kmh(&self) -> f64 {
        match self {
            VehicleType::Bike => 30.0,
            VehicleType::Car => 40.0,
            VehicleType::Cng => 25.0,
        }
    }
}
