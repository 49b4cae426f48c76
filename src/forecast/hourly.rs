//! Short-horizon hourly crowd series.

use std::fmt;

use serde::Serialize;

use super::diurnal::HOURLY_PROFILE;
use super::{clamp_percent, check_hour};
use crate::error::Result;
use crate::random::RandomSource;

/// Default number of hourly points.
pub const DEFAULT_HOURLY_LENGTH: usize = 9;

/// Points below this crowd percentage are recommended.
pub const RECOMMENDED_BELOW_PERCENT: u8 = 30;

/// Points above this crowd percentage are flagged busy.
pub const BUSY_ABOVE_PERCENT: u8 = 80;

/// Final symmetric noise applied after the band jitter.
const POINT_JITTER: f64 = 15.0;

/// One hour of the short-horizon forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    /// 12-hour label such as `"9AM"`.
    pub hour_label: String,
    /// 5–100.
    pub crowd_percent: u8,
    pub is_recommended: bool,
    /// 0–23.
    pub hour_of_day: u32,
}

impl HourlyPoint {
    pub fn is_busy(&self) -> bool {
        self.crowd_percent > BUSY_ABOVE_PERCENT
    }
}

impl fmt::Display for HourlyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_recommended {
            " best"
        } else if self.is_busy() {
            " busy"
        } else {
            ""
        };
        write!(f, "{:>4} {:>3}%{tag}", self.hour_label, self.crowd_percent)
    }
}

/// `(hour on a 12-hour clock, "AM" | "PM")` for an hour of day.
pub fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let h12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    (h12, meridiem)
}

/// Generates `length` hourly points starting at `start_hour`, in chronological
/// order, wrapping past midnight.
///
/// Each point draws the band jitter centred on zero, then a further symmetric
/// jitter, before clamping into `[5, 100]`.
///
/// # Errors
///
/// Returns [`crate::ForecastError::InvalidHour`] if `start_hour > 23`.
pub fn hourly_series<R: RandomSource + ?Sized>(
    baseline: f64,
    start_hour: u32,
    length: usize,
    rng: &mut R,
) -> Result<Vec<HourlyPoint>> {
    check_hour(start_hour)?;

    let mut points = Vec::with_capacity(length);
    for i in 0..length {
        let hour = (start_hour + (i % 24) as u32) % 24;
        let band = HOURLY_PROFILE.band_for(hour);

        let raw = baseline * band.multiplier + rng.uniform(band.jitter_amplitude)
            - band.jitter_amplitude / 2.0;
        let crowd_percent = clamp_percent(raw + rng.symmetric(POINT_JITTER));

        let (h12, meridiem) = twelve_hour(hour);
        points.push(HourlyPoint {
            hour_label: format!("{h12}{meridiem}"),
            crowd_percent,
            is_recommended: crowd_percent < RECOMMENDED_BELOW_PERCENT,
            hour_of_day: hour,
        });
    }
    Ok(points)
}
