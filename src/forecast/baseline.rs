//! Aggregate crowd baseline across nearby zones.

use crate::error::{ForecastError, Result};
use crate::zones::NearbyZone;

/// Mean of the zones' crowd-level percentages, in `[25, 95]`.
///
/// # Errors
///
/// Returns [`ForecastError::EmptyZoneSet`] when `zones` is empty.
pub fn aggregate_baseline(zones: &[NearbyZone]) -> Result<f64> {
    if zones.is_empty() {
        return Err(ForecastError::EmptyZoneSet);
    }
    let total: f64 = zones.iter().map(|nz| nz.zone.crowd_level.percent()).sum();
    Ok(total / zones.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::zones::{CrowdLevel, city_zones};

    fn with_levels(levels: &[CrowdLevel]) -> Vec<NearbyZone> {
        let template = city_zones().remove(0);
        levels
            .iter()
            .map(|&crowd_level| NearbyZone {
                zone: crate::zones::Zone {
                    crowd_level,
                    ..template.clone()
                },
                distance_km: 0.0,
                position: Coordinate { lat: 0.0, lng: 0.0 },
            })
            .collect()
    }

    #[test]
    fn low_and_critical_average_to_sixty() {
        let zones = with_levels(&[CrowdLevel::Low, CrowdLevel::Critical]);
        assert_eq!(aggregate_baseline(&zones).unwrap(), 60.0);
    }

    #[test]
    fn single_zone_is_its_own_percent() {
        let zones = with_levels(&[CrowdLevel::High]);
        assert_eq!(aggregate_baseline(&zones).unwrap(), 75.0);
    }

    #[test]
    fn bounds_hold_for_mixed_levels() {
        use CrowdLevel::{Critical, High, Low, Moderate};
        let mixes: [&[CrowdLevel]; 5] = [
            &[Low],
            &[Critical],
            &[Low, Low, Moderate],
            &[High, Critical, Critical],
            &[Low, Moderate, High, Critical],
        ];
        for mix in mixes {
            let b = aggregate_baseline(&with_levels(mix)).unwrap();
            assert!((25.0..=95.0).contains(&b), "{mix:?} -> {b}");
        }
    }

    #[test]
    fn empty_set_is_an_error() {
        assert!(matches!(
            aggregate_baseline(&[]),
            Err(ForecastError::EmptyZoneSet)
        ));
    }
}
