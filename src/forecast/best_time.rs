//! Ranking of the quietest upcoming hours.

use std::fmt;

use serde::Serialize;

use super::hourly::{HourlyPoint, twelve_hour};
use crate::error::{ForecastError, Result};
use crate::zones::NearbyZone;

/// Default number of ranked slots.
pub const DEFAULT_TOP_N: usize = 3;

/// Length of a suggested visiting window (hours).
const WINDOW_HOURS: u32 = 2;

const REASONS: [&str; 5] = [
    "Lowest crowd density",
    "Off-peak period",
    "Quiet time",
    "Best conditions",
    "Optimal timing",
];

/// A suggested time to visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestTimeSlot {
    /// e.g. `"11:00 PM - 1:00 AM"`.
    pub window_label: String,
    pub zone_name: String,
    /// Distance to the zone, one decimal place.
    pub distance_km: String,
    pub reason: String,
    pub hour_of_day: u32,
    pub crowd_percent: u8,
}

impl fmt::Display for BestTimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} ({} km) - {}",
            self.window_label, self.zone_name, self.distance_km, self.reason
        )
    }
}

/// Formats `[hour, hour + 2)` on a 12-hour clock, wrapping at midnight.
pub fn window_label(hour: u32) -> String {
    let (start, start_meridiem) = twelve_hour(hour % 24);
    let (end, end_meridiem) = twelve_hour((hour + WINDOW_HOURS) % 24);
    format!("{start}:00 {start_meridiem} - {end}:00 {end_meridiem}")
}

/// The `top_n` least crowded hours, quietest first.
///
/// Ties keep their chronological order. Zones are assigned round-robin by
/// rank, not matched by proximity or crowding.
///
/// # Errors
///
/// Returns [`ForecastError::EmptyZoneSet`] if there are slots to fill but no
/// zones to assign them to.
pub fn best_times(
    hourly: &[HourlyPoint],
    zones: &[NearbyZone],
    top_n: usize,
) -> Result<Vec<BestTimeSlot>> {
    let mut ranked: Vec<&HourlyPoint> = hourly.iter().collect();
    ranked.sort_by_key(|p| p.crowd_percent);
    ranked.truncate(top_n);

    if !ranked.is_empty() && zones.is_empty() {
        return Err(ForecastError::EmptyZoneSet);
    }

    let slots = ranked
        .into_iter()
        .enumerate()
        .map(|(rank, point)| {
            let zone = &zones[rank % zones.len()];
            BestTimeSlot {
                window_label: window_label(point.hour_of_day),
                zone_name: zone.zone.name.clone(),
                distance_km: format!("{:.1}", zone.distance_km),
                reason: REASONS[rank % REASONS.len()].to_string(),
                hour_of_day: point.hour_of_day,
                crowd_percent: point.crowd_percent,
            }
        })
        .collect();
    Ok(slots)
}
