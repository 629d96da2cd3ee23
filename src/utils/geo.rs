use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::FareError;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, FareError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(FareError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(FareError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                lng
            )));
        }

        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Accepts `{"lat": .., "lng": ..}` (numbers or numeric strings) or a
/// `"lat,lng"` string from a JSON body.
impl TryFrom<&Value> for GeoPoint {
    type Error = FareError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => s.parse(),
            Value::Object(fields) => {
                let component = |name: &str| -> Result<f64, FareError> {
                    match fields.get(name) {
                        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                            FareError::InvalidCoordinate(format!("{} {} is not representable", name, n))
                        }),
                        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
                            FareError::InvalidCoordinate(format!("{} {:?} is not a number", name, s))
                        }),
                        Some(other) => Err(FareError::InvalidCoordinate(format!(
                            "{} must be a number, got {}",
                            name, other
                        ))),
                        None => Err(FareError::InvalidCoordinate(format!("missing {}", name))),
                    }
                };

                GeoPoint::new(component("lat")?, component("lng")?)
            }
            other => Err(FareError::InvalidCoordinate(format!(
                "expected {{\"lat\", \"lng\"}} or \"lat,lng\", got {}",
                other
            ))),
        }
    }
}

/// Parses the `"lat,lng"` form used in query strings.
impl FromStr for GeoPoint {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| FareError::InvalidCoordinate(format!("expected \"lat,lng\", got {:?}", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| FareError::InvalidCoordinate(format!("{:?} is not a number", part.trim())))
        };

        GeoPoint::new(parse(lat)?, parse(lng)?)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h slightly outside [0, 1] near identical or antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
