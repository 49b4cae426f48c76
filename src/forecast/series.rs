//! 24-hour predicted vs. actual crowd series.

use std::fmt;

use serde::Serialize;

use super::diurnal::FORECAST_PROFILE;
use super::{check_hour, clamp_percent};
use crate::error::Result;
use crate::random::RandomSource;

/// Points in a full-day series.
pub const FORECAST_HOURS: usize = 24;

/// Noise between predicted and actual for the current hour.
const CURRENT_HOUR_ACTUAL_JITTER: f64 = 10.0;

/// Noise between predicted and actual for later hours.
const ACTUAL_JITTER: f64 = 15.0;

/// One hour of the 24-hour forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    /// `"HH:00"`.
    pub hour_label: String,
    /// 5–100.
    pub predicted_percent: u8,
    /// 5–100.
    pub actual_percent: u8,
    pub zone_label: String,
}

impl fmt::Display for ForecastPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} predicted={:>3}% actual={:>3}% [{}]",
            self.hour_label, self.predicted_percent, self.actual_percent, self.zone_label
        )
    }
}

/// Generates one point per hour for a full day starting at `start_hour`.
///
/// `predicted` follows [`FORECAST_PROFILE`] with centred band jitter;
/// `actual` adds an independent symmetric draw around the unrounded
/// prediction. Both are clamped and rounded separately.
///
/// # Errors
///
/// Returns [`crate::ForecastError::InvalidHour`] if `start_hour > 23`.
pub fn forecast_series<R: RandomSource + ?Sized>(
    baseline: f64,
    start_hour: u32,
    zone_label: &str,
    rng: &mut R,
) -> Result<Vec<ForecastPoint>> {
    check_hour(start_hour)?;

    let points = (0..FORECAST_HOURS as u32)
        .map(|offset| {
            let hour = (start_hour + offset) % 24;
            let band = FORECAST_PROFILE.band_for(hour);

            let predicted = baseline * band.multiplier + rng.uniform(band.jitter_amplitude)
                - band.jitter_amplitude / 2.0;
            let spread = if offset == 0 {
                CURRENT_HOUR_ACTUAL_JITTER
            } else {
                ACTUAL_JITTER
            };
            let actual = predicted + rng.symmetric(spread);

            ForecastPoint {
                hour_label: format!("{hour:02}:00"),
                predicted_percent: clamp_percent(predicted),
                actual_percent: clamp_percent(actual),
                zone_label: zone_label.to_string(),
            }
        })
        .collect();
    Ok(points)
}
