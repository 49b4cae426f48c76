//! Location-aware crowd forecast synthesis.
//!
//! The pipeline is: place the zones around the user and keep the nearby ones
//! ([`proximity`]), average their crowd levels into a baseline ([`baseline`]),
//! expand the baseline through the diurnal band tables ([`diurnal`]) into a
//! short hourly series ([`hourly`]) and a full-day series ([`series`]), then
//! rank the quietest hours ([`best_time`]).
//!
//! Every stage is pure apart from the injected [`RandomSource`]; the current
//! time is passed in rather than read from the clock.

pub mod baseline;
pub mod best_time;
pub mod diurnal;
pub mod hourly;
pub mod proximity;
pub mod series;

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

pub use baseline::aggregate_baseline;
pub use best_time::{BestTimeSlot, DEFAULT_TOP_N, best_times};
pub use hourly::{DEFAULT_HOURLY_LENGTH, HourlyPoint, hourly_series};
pub use proximity::{DEFAULT_MAX_DISTANCE_KM, nearby_zones, nearby_zones_scaled};
pub use series::{FORECAST_HOURS, ForecastPoint, forecast_series};

use crate::error::{ForecastError, Result};
use crate::geo::GEO_OFFSET_SCALE;
use crate::location::UserLocation;
use crate::random::RandomSource;
use crate::zones::{NearbyZone, Zone, ZoneSnapshot, live_zone_snapshots};

const MIN_PERCENT: f64 = 5.0;
const MAX_PERCENT: f64 = 100.0;

/// Clamps into `[5, 100]` and rounds to the nearest whole percent. NaN maps
/// to the floor.
pub(crate) fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return MIN_PERCENT as u8;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT).round() as u8
}

pub(crate) fn check_hour(hour: u32) -> Result<()> {
    if hour < 24 {
        Ok(())
    } else {
        Err(ForecastError::InvalidHour(hour))
    }
}

/// Tunables for one engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Search radius (km).
    pub max_distance_km: f64,
    /// Points in the short-horizon series.
    pub hourly_length: usize,
    /// Ranked best-time slots.
    pub top_n: usize,
    /// Degrees per planar unit when placing zones.
    pub geo_scale: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            hourly_length: DEFAULT_HOURLY_LENGTH,
            top_n: DEFAULT_TOP_N,
            geo_scale: GEO_OFFSET_SCALE,
        }
    }
}

/// Everything produced by one pipeline invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub generated_at: NaiveDateTime,
    pub location: UserLocation,
    pub nearby: Vec<NearbyZone>,
    /// Mean crowd percentage of `nearby`.
    pub baseline: f64,
    pub hourly: Vec<HourlyPoint>,
    pub forecast: Vec<ForecastPoint>,
    pub best_times: Vec<BestTimeSlot>,
    pub zone_cards: Vec<ZoneSnapshot>,
}

impl fmt::Display for ForecastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Crowd forecast for {} ({}) at {} ---",
            self.location.display_name(),
            self.location.coordinate(),
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
        )?;
        writeln!(
            f,
            "Showing forecasts for {} nearby zone{} (baseline {:.1}%)",
            self.nearby.len(),
            if self.nearby.len() == 1 { "" } else { "s" },
            self.baseline,
        )?;
        for nz in &self.nearby {
            writeln!(f, "  {nz}")?;
        }

        writeln!(f, "\nHourly crowd prediction:")?;
        for p in &self.hourly {
            writeln!(f, "  {p}")?;
        }

        writeln!(f, "\nBest time to go:")?;
        for slot in &self.best_times {
            writeln!(f, "  {slot}")?;
        }

        writeln!(f, "\nZone forecasts:")?;
        for card in &self.zone_cards {
            writeln!(f, "  {card}")?;
        }

        writeln!(f, "\n24-hour forecast:")?;
        for p in &self.forecast {
            writeln!(f, "  {p}")?;
        }
        Ok(())
    }
}

/// Runs the forecast pipeline over a fixed zone list.
///
/// Holds no mutable state; one engine can serve any number of callers as long
/// as each passes its own random source.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    zones: Vec<Zone>,
    settings: EngineSettings,
}

impl ForecastEngine {
    pub fn new(zones: Vec<Zone>, settings: EngineSettings) -> Self {
        Self { zones, settings }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Zones near `location` under this engine's radius and scale.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidCoordinate`] if the location is out of range.
    pub fn nearby(&self, location: &UserLocation) -> Result<Vec<NearbyZone>> {
        let user = location.coordinate();
        user.validate()?;
        Ok(nearby_zones_scaled(
            &user,
            &self.zones,
            self.settings.max_distance_km,
            self.settings.geo_scale,
        ))
    }

    /// Produces a full report for `location` as of `now`.
    ///
    /// Random draws are taken in a fixed order (hourly series, 24-hour series,
    /// zone cards), so a seeded source reproduces the same report.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::InvalidCoordinate`] for an out-of-range location.
    /// - [`ForecastError::EmptyZoneSet`] when the engine has no zones.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        location: &UserLocation,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Result<ForecastReport> {
        let nearby = self.nearby(location)?;
        let baseline = aggregate_baseline(&nearby)?;
        let start_hour = now.hour();
        tracing::debug!(
            zones = nearby.len(),
            baseline,
            start_hour,
            "computed forecast baseline"
        );

        let hourly = hourly_series(baseline, start_hour, self.settings.hourly_length, rng)?;
        let forecast = forecast_series(baseline, start_hour, &location.display_name(), rng)?;
        let best_times = best_times(&hourly, &nearby, self.settings.top_n)?;
        let zone_cards = live_zone_snapshots(&nearby, rng);

        Ok(ForecastReport {
            generated_at: now,
            location: location.clone(),
            nearby,
            baseline,
            hourly,
            forecast,
            best_times,
            zone_cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::zones::city_zones;

    fn at_hour(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(hour, 15, 0))
            .unwrap()
    }

    fn engine() -> ForecastEngine {
        ForecastEngine::new(city_zones(), EngineSettings::default())
    }

    #[test]
    fn clamp_percent_bounds() {
        assert_eq!(clamp_percent(-20.0), 5);
        assert_eq!(clamp_percent(4.4), 5);
        assert_eq!(clamp_percent(42.5), 43);
        assert_eq!(clamp_percent(250.0), 100);
        assert_eq!(clamp_percent(f64::NAN), 5);
        assert_eq!(clamp_percent(f64::INFINITY), 100);
        assert_eq!(clamp_percent(f64::NEG_INFINITY), 5);
    }

    #[test]
    fn report_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let report = engine()
            .run(&UserLocation::default(), at_hour(22), &mut rng)
            .unwrap();
        assert_eq!(report.hourly.len(), DEFAULT_HOURLY_LENGTH);
        assert_eq!(report.forecast.len(), FORECAST_HOURS);
        assert_eq!(report.best_times.len(), DEFAULT_TOP_N);
        assert_eq!(report.hourly[0].hour_of_day, 22);
        assert_eq!(report.forecast[0].hour_label, "22:00");
        assert_eq!(report.forecast[0].zone_label, "New York City");
        assert!(report.zone_cards.len() <= report.nearby.len());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let location = UserLocation::default();
        let a = engine()
            .run(&location, at_hour(9), &mut StdRng::seed_from_u64(5))
            .unwrap();
        let b = engine()
            .run(&location, at_hour(9), &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(a.hourly, b.hourly);
        assert_eq!(a.forecast, b.forecast);
        assert_eq!(a.best_times, b.best_times);
        assert_eq!(a.zone_cards, b.zone_cards);
    }

    #[test]
    fn invalid_location_is_rejected() {
        let location = UserLocation::at(120.0, 0.0);
        let err = engine().run(&location, at_hour(9), &mut StdRng::seed_from_u64(1));
        assert!(matches!(err, Err(ForecastError::InvalidCoordinate { .. })));
    }

    #[test]
    fn empty_engine_reports_empty_zone_set() {
        let empty = ForecastEngine::new(Vec::new(), EngineSettings::default());
        let err = empty.run(
            &UserLocation::default(),
            at_hour(9),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(err, Err(ForecastError::EmptyZoneSet)));
    }

    #[test]
    fn display_lists_every_section() {
        let report = engine()
            .run(&UserLocation::default(), at_hour(12), &mut StdRng::seed_from_u64(2))
            .unwrap();
        let text = report.to_string();
        assert!(text.contains("New York City"));
        assert!(text.contains("Hourly crowd prediction"));
        assert!(text.contains("Best time to go"));
        assert!(text.contains("24-hour forecast"));
    }
}
