pub mod estimator;
pub mod eta;
pub mod promo;
pub mod vehicle;

pub use estimator::{FareBreakdown, FareEstimator};
pub use eta::{format_duration, recalculate, recalculate_for, EtaEstimate};
pub use promo::{PromoCatalog, PromoCode, PromoOutcome};
pub use vehicle::{Tariff, VehicleType};

const MINOR_UNITS: f64 = 100.0;

/// Rounds a currency amount half-up to two decimal places.
pub fn round_half_up(value: f64) -> f64 {
    // 1e-9 absorbs binary representation error, e.g. 1.005 * 100 == 100.49999999999999.
    ((value * MINOR_UNITS) + 0.5 + 1e-9).floor() / MINOR_UNITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1.005), 1.01);
        assert_eq!(round_half_up(2.675), 2.68);
        assert_eq!(round_half_up(10.004), 10.0);
        assert_eq!(round_half_up(0.0), 0.0);
        assert_eq!(round_half_up(99.995), 100.0);
    }
}
