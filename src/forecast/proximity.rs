//! Distance filtering of zones around a user coordinate.

use crate::geo::{Coordinate, GEO_OFFSET_SCALE, approximate_geo_position};
use crate::zones::{NearbyZone, Zone};

/// Default search radius (km).
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Number of zones returned when nothing lies inside the radius.
pub const FALLBACK_ZONE_COUNT: usize = 4;

/// Zones within `max_distance_km` of `user`, nearest first.
///
/// Uses [`GEO_OFFSET_SCALE`] to place the planar zones. See
/// [`nearby_zones_scaled`] for the fallback rules.
pub fn nearby_zones(user: &Coordinate, zones: &[Zone], max_distance_km: f64) -> Vec<NearbyZone> {
    nearby_zones_scaled(user, zones, max_distance_km, GEO_OFFSET_SCALE)
}

/// Zones within `max_distance_km` of `user`, nearest first, placing each zone
/// `scale` degrees per planar unit away from the user.
///
/// A non-positive or NaN radius selects nothing. When nothing is selected the
/// first [`FALLBACK_ZONE_COUNT`] zones are returned in input order, each at
/// distance zero and positioned on the user, so the result is only empty when
/// `zones` is.
pub fn nearby_zones_scaled(
    user: &Coordinate,
    zones: &[Zone],
    max_distance_km: f64,
    scale: f64,
) -> Vec<NearbyZone> {
    let mut nearby: Vec<NearbyZone> = if max_distance_km > 0.0 {
        zones
            .iter()
            .map(|zone| {
                let position = approximate_geo_position(user, &zone.coordinates, scale);
                NearbyZone {
                    zone: zone.clone(),
                    distance_km: user.distance_to(&position),
                    position,
                }
            })
            .filter(|nz| nz.distance_km <= max_distance_km)
            .collect()
    } else {
        Vec::new()
    };

    if nearby.is_empty() {
        tracing::debug!(
            max_distance_km,
            "no zones inside search radius, falling back to first {FALLBACK_ZONE_COUNT}"
        );
        return zones
            .iter()
            .take(FALLBACK_ZONE_COUNT)
            .map(|zone| NearbyZone {
                zone: zone.clone(),
                distance_km: 0.0,
                position: *user,
            })
            .collect();
    }

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}
