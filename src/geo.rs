//! Geographic primitives: validated coordinates, great-circle distance, and
//! the planar-to-geographic zone placement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Mean Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees of offset per planar unit away from the centre of the zone grid.
///
/// Arbitrary and not geographically meaningful; tune through
/// `forecast.geo_scale` in the config.
pub const GEO_OFFSET_SCALE: f64 = 0.01;

/// Centre of the 0–100 planar zone grid, mapped onto the user's position.
const PLANAR_CENTRE: f64 = 50.0;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside `[-90, 90]` x `[-180, 180]`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidCoordinate`] for out-of-range or
    /// non-finite values.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let c = Self { lat, lng };
        c.validate()?;
        Ok(c)
    }

    /// Re-checks a coordinate that was built directly or deserialized.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidCoordinate`] if either axis is out of range.
    pub fn validate(&self) -> Result<()> {
        if (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng) {
            Ok(())
        } else {
            Err(ForecastError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_km(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Abstract zone position on a 0–100 grid. Not geographic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// Haversine distance between two coordinates (degrees in, kilometres out).
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Places a planar zone around `origin` by treating its offset from the grid
/// centre as an angular offset of `scale` degrees per unit.
///
/// `y` drives latitude and `x` drives longitude. The result is not range
/// checked; it is only ever used as a distance operand.
pub fn approximate_geo_position(origin: &Coordinate, planar: &PlanarPoint, scale: f64) -> Coordinate {
    Coordinate {
        lat: origin.lat + (planar.y - PLANAR_CENTRE) * scale,
        lng: origin.lng + (planar.x - PLANAR_CENTRE) * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(matches!(
            Coordinate::new(91.0, 0.0),
            Err(ForecastError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_longitude_and_nan() {
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let nyc = Coordinate::new(40.7128, -74.006).unwrap();
        assert_eq!(nyc.distance_to(&nyc), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(1.0, 0.0).unwrap();
        let d = haversine_km(&a, &b);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn nyc_to_london() {
        let nyc = Coordinate::new(40.7128, -74.006).unwrap();
        let london = Coordinate::new(51.5074, -0.1278).unwrap();
        let d = nyc.distance_to(&london);
        assert!((d - 5570.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn grid_centre_maps_onto_origin() {
        let origin = Coordinate::new(10.0, 20.0).unwrap();
        let pos = approximate_geo_position(&origin, &PlanarPoint { x: 50.0, y: 50.0 }, GEO_OFFSET_SCALE);
        assert_eq!(pos, origin);
    }

    #[test]
    fn planar_offsets_map_y_to_lat_and_x_to_lng() {
        let origin = Coordinate::new(10.0, 20.0).unwrap();
        let pos = approximate_geo_position(&origin, &PlanarPoint { x: 60.0, y: 30.0 }, 0.01);
        assert!((pos.lat - 9.8).abs() < 1e-9);
        assert!((pos.lng - 20.1).abs() < 1e-9);
    }

    #[test]
    fn display_uses_four_decimals() {
        let c = Coordinate::new(40.7128, -74.006).unwrap();
        assert_eq!(c.to_string(), "40.7128, -74.0060");
    }
}
