//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use crowd_forecast::geo::{Coordinate, PlanarPoint};
use crowd_forecast::zones::{CrowdLevel, NearbyZone, Zone};

/// 10 March 2025 at `hour`:00 local time.
pub fn at_hour(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture time")
}

/// Zone with neutral metrics at planar position `(x, y)`.
pub fn zone(id: &str, level: CrowdLevel, x: f64, y: f64) -> Zone {
    Zone {
        id: id.to_string(),
        name: format!("Zone {id}"),
        crowd_level: level,
        safety_score: 80,
        traffic_level: 50,
        active_events: 0,
        business_activity: 50,
        coordinates: PlanarPoint { x, y },
    }
}

/// Nearby zones at the origin with the given crowd levels, spaced 1 km apart.
pub fn nearby(levels: &[CrowdLevel]) -> Vec<NearbyZone> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| NearbyZone {
            zone: zone(&i.to_string(), level, 50.0, 50.0),
            distance_km: i as f64,
            position: Coordinate { lat: 0.0, lng: 0.0 },
        })
        .collect()
}

/// A spread of user coordinates across both hemispheres.
pub fn sample_coordinates() -> Vec<Coordinate> {
    vec![
        Coordinate { lat: 40.7128, lng: -74.006 },
        Coordinate { lat: 51.5074, lng: -0.1278 },
        Coordinate { lat: -33.8688, lng: 151.2093 },
        Coordinate { lat: 0.0, lng: 0.0 },
        Coordinate { lat: 64.1466, lng: -21.9426 },
        Coordinate { lat: -54.8019, lng: -68.303 },
    ]
}
