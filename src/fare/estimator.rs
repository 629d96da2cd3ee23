use std::sync::Arc;

use serde::Serialize;

use crate::error::FareError;
use crate::fare::eta::{format_duration, travel_minutes};
use crate::fare::promo::PromoCatalog;
use crate::fare::round_half_up;
use crate::fare::vehicle::VehicleType;
use crate::utils::geo::{haversine_distance, GeoPoint};

/// Tax charged on base + distance + time fares, in percent.
pub const TAX_PERCENT: f64 = 5.0;

/// Itemised fare quote shown on the booking form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub distance_km: f64,
    pub base_fare: f64,
    pub distance_fare: f64,
    pub time_fare: f64,
    pub tax: f64,
    pub subtotal: f64,
    pub discount_percent: u8,
    /// Final price after discount, rounded half-up to two decimals. Without a
    /// promo this is `subtotal` rounded, so it may sit up to half a minor unit
    /// above the unrounded `subtotal`.
    pub cost: f64,
    pub arrival_time: String,
    pub promo_applied: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FareEstimator {
    catalog: Arc<PromoCatalog>,
}

impl FareEstimator {
    pub fn new(catalog: Arc<PromoCatalog>) -> Self {
        Self { catalog }
    }

    /// Quotes a ride from `pickup` to `drop`.
    ///
    /// Fails with [`FareError::UnsupportedVehicleType`] for anything other than
    /// `Bike`, `Car` or `Cng`. Unknown promo codes are ignored.
    pub fn estimate(
        &self,
        pickup: &GeoPoint,
        drop: &GeoPoint,
        vehicle_type: &str,
        promo_code: Option<&str>,
    ) -> Result<FareBreakdown, FareError> {
        let vehicle_type = VehicleType::parse_strict(vehicle_type)?;
        Ok(self.estimate_for(pickup, drop, vehicle_type, promo_code))
    }

    pub fn estimate_for(
        &self,
        pickup: &GeoPoint,
        drop: &GeoPoint,
        vehicle_type: VehicleType,
        promo_code: Option<&str>,
    ) -> FareBreakdown {
        let tariff = vehicle_type.tariff();
        let distance_km = haversine_distance(pickup, drop);
        let trip_minutes = distance_km / vehicle_type.booking_avg_speed_kmh() * 60.0;

        let base_fare = tariff.base_fare;
        let distance_fare = distance_km * tariff.per_km_rate;
        let time_fare = trip_minutes * tariff.per_minute_rate;
        let tax = (base_fare + distance_fare + time_fare) * TAX_PERCENT / 100.0;
        let subtotal = base_fare + distance_fare + time_fare + tax;

        let promo = self.catalog.apply(subtotal, promo_code);
        let arrival_minutes = travel_minutes(distance_km, vehicle_type.booking_avg_speed_kmh());

        FareBreakdown {
            distance_km,
            base_fare,
            distance_fare,
            time_fare,
            tax,
            subtotal,
            discount_percent: promo.discount_percent,
            cost: round_half_up(promo.discounted),
            arrival_time: format_duration(arrival_minutes),
            promo_applied: promo.applied_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn estimator() -> FareEstimator {
        FareEstimator::new(Arc::new(PromoCatalog::builtin().unwrap()))
    }

    #[test]
    fn test_dhaka_car_with_welcome_promo() {
        let pickup = point(23.8103, 90.4125);
        let drop = point(23.7105, 90.4074);

        let fare = estimator()
            .estimate(&pickup, &drop, "Car", Some("WELCOME10"))
            .unwrap();

        assert!((fare.distance_km - 11.0).abs() <= 0.5, "got {}", fare.distance_km);
        assert_eq!(fare.discount_percent, 10);
        assert_eq!(fare.promo_applied.as_deref(), Some("WELCOME10"));
        assert!(fare.cost < fare.subtotal);
        assert_eq!(fare.cost, round_half_up(fare.subtotal * 0.9));

        let minutes = travel_minutes(fare.distance_km, VehicleType::Car.booking_avg_speed_kmh());
        assert_eq!(fare.arrival_time, format_duration(minutes));
        assert_eq!(fare.arrival_time, "22 min");
    }

    #[test]
    fn test_breakdown_adds_up() {
        let pickup = point(23.8103, 90.4125);
        let drop = point(23.7105, 90.4074);

        let fare = estimator().estimate(&pickup, &drop, "Bike", None).unwrap();
        let pre_tax = fare.base_fare + fare.distance_fare + fare.time_fare;

        assert_eq!(fare.base_fare, VehicleType::Bike.tariff().base_fare);
        assert!((fare.tax - pre_tax * 0.05).abs() < 1e-9);
        assert!((fare.subtotal - (pre_tax + fare.tax)).abs() < 1e-9);
        assert_eq!(fare.discount_percent, 0);
        assert_eq!(fare.promo_applied, None);
    }

    #[test]
    fn test_zero_distance() {
        let p = point(23.8103, 90.4125);
        let fare = estimator().estimate(&p, &p, "Cng", None).unwrap();

        assert_eq!(fare.distance_km, 0.0);
        assert_eq!(fare.distance_fare, 0.0);
        assert_eq!(fare.time_fare, 0.0);
        assert_eq!(fare.arrival_time, "0 min");
        assert_eq!(fare.base_fare, VehicleType::Cng.tariff().base_fare);
    }

    #[test]
    fn test_unsupported_vehicle_type_fails_fast() {
        let pickup = point(23.8103, 90.4125);
        let drop = point(23.7105, 90.4074);

        let err = estimator().estimate(&pickup, &drop, "Plane", None).unwrap_err();
        assert_eq!(err, FareError::UnsupportedVehicleType("Plane".to_string()));
    }

    #[test]
    fn test_unknown_promo_is_ignored() {
        let pickup = point(23.8103, 90.4125);
        let drop = point(23.7105, 90.4074);

        let fare = estimator()
            .estimate(&pickup, &drop, "Car", Some("NOT-A-CODE"))
            .unwrap();
        assert_eq!(fare.discount_percent, 0);
        assert_eq!(fare.promo_applied, None);
        assert_eq!(fare.cost, round_half_up(fare.subtotal));
    }

    #[test]
    fn test_fare_is_monotonic_in_distance() {
        let estimator = estimator();
        let pickup = point(23.8103, 90.4125);

        for promo in [None, Some("SAVE20")] {
            let mut previous: Option<FareBreakdown> = None;
            for step in 1..=20 {
                let drop = point(23.8103 - step as f64 * 0.01, 90.4125);
                let fare = estimator.estimate(&pickup, &drop, "Car", promo).unwrap();

                if let Some(prev) = &previous {
                    assert!(fare.distance_fare > prev.distance_fare);
                    assert!(fare.cost >= prev.cost);
                }
                previous = Some(fare);
            }
        }
    }

    #[test]
    fn test_promo_cost_never_exceeds_subtotal() {
        let estimator = estimator();
        let catalog = PromoCatalog::builtin().unwrap();
        let pickup = point(23.8103, 90.4125);
        let drop = point(22.3569, 91.7832);

        for promo in catalog.codes() {
            let fare = estimator.estimate(&pickup, &drop, "Bike", Some(&promo.code)).unwrap();
            assert!(fare.cost <= fare.subtotal);
            assert!(fare.cost >= 0.0);
            assert!(fare.discount_percent > 0 && fare.discount_percent <= 100);
        }
    }

    #[test]
    fn test_cost_without_promo_is_rounded_subtotal() {
        let estimator = estimator();
        let pickup = point(23.8103, 90.4125);

        for step in 1..=200 {
            let drop = point(23.8103 - step as f64 * 0.0001, 90.4125);
            let fare = estimator.estimate(&pickup, &drop, "Car", None).unwrap();

            assert_eq!(fare.cost, round_half_up(fare.subtotal), "step {}", step);
            assert!(
                (fare.cost - fare.subtotal).abs() <= 0.005 + 1e-9,
                "step {}: subtotal={} cost={}",
                step,
                fare.subtotal,
                fare.cost
            );
        }
    }
}
