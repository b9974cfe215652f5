//! # Distance Sources
//!
//! Each source knows one way of answering "how far is it?".
//!
//! | Source                | Needs                     | Accuracy            |
//! |-----------------------|---------------------------|---------------------|
//! | `ManualDistance`      | a number from the user    | whatever was typed  |
//! | `GreatCircleDistance` | coordinates for both ends | straight line only  |
//!
//! A routing provider would be another implementation of the same trait.

use std::fmt;
use std::str::FromStr;

use crate::error::{DistanceError, DistanceResult};
use crate::round_one_decimal;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Something that can turn two location labels into a distance.
pub trait DistanceSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Distance in km between the two locations.
    fn distance_km(&self, origin: &str, destination: &str) -> DistanceResult<f64>;
}

// =============================================================================
// Manual Distance
// =============================================================================

/// A distance the user already knows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualDistance(pub f64);

impl DistanceSource for ManualDistance {
    fn name(&self) -> &str {
        "manual"
    }

    fn distance_km(&self, _origin: &str, _destination: &str) -> DistanceResult<f64> {
        usable(self.name(), self.0)
    }
}

// =============================================================================
// Coordinates
// =============================================================================

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting values off the globe.
    pub fn new(lat: f64, lon: f64) -> DistanceResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DistanceError::InvalidCoordinate(format!(
                "latitude {} is outside -90..90",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DistanceError::InvalidCoordinate(format!(
                "longitude {} is outside -180..180",
                lon
            )));
        }
        Ok(Coordinates { lat, lon })
    }

    /// Haversine distance to `other`, in km, unrounded.
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"`.
impl FromStr for Coordinates {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| {
            DistanceError::InvalidCoordinate(format!("'{}' is not in lat,lon form", s))
        })?;

        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                DistanceError::InvalidCoordinate(format!("'{}' is not a number", part.trim()))
            })
        };

        Coordinates::new(parse(lat)?, parse(lon)?)
    }
}

// =============================================================================
// Great-Circle Distance
// =============================================================================

/// Straight-line distance between known coordinates.
///
/// Underestimates road distance; it exists so a quote can still be produced
/// when no better source answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircleDistance {
    pub origin: Coordinates,
    pub destination: Coordinates,
}

impl GreatCircleDistance {
    pub fn new(origin: Coordinates, destination: Coordinates) -> Self {
        GreatCircleDistance {
            origin,
            destination,
        }
    }
}

impl DistanceSource for GreatCircleDistance {
    fn name(&self) -> &str {
        "great-circle"
    }

    fn distance_km(&self, _origin: &str, _destination: &str) -> DistanceResult<f64> {
        let km = round_one_decimal(self.origin.haversine_km(&self.destination));
        usable(self.name(), km)
    }
}

/// A distance the pricing core will accept: finite and positive.
fn usable(source_name: &str, km: f64) -> DistanceResult<f64> {
    if !km.is_finite() || km <= 0.0 {
        return Err(DistanceError::InvalidDistance {
            source_name: source_name.to_string(),
            value: km,
        });
    }
    Ok(km)
}
