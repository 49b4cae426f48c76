//! Periodic re-runs of the forecast to simulate a live feed.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{ForecastError, Result};
use crate::forecast::{ForecastEngine, ForecastReport};
use crate::location::UserLocation;
use crate::random::RandomSource;

/// Default seconds between refreshes.
pub const DEFAULT_REFRESH_SECS: u64 = 5;

/// Longest accepted refresh cadence: one day.
pub const MAX_REFRESH_SECS: u64 = 86_400;

/// Re-invokes the engine once per tick at `start + tick * cadence`.
///
/// Each report is independent; nothing carries over between ticks except the
/// random source the caller supplies.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use crowd_forecast::forecast::{EngineSettings, ForecastEngine};
/// use crowd_forecast::live::LiveFeed;
/// use crowd_forecast::location::UserLocation;
/// use crowd_forecast::random::FixedSource;
/// use crowd_forecast::zones::city_zones;
///
/// let engine = ForecastEngine::new(city_zones(), EngineSettings::default());
/// let start = NaiveDate::from_ymd_opt(2025, 3, 10)
///     .and_then(|d| d.and_hms_opt(8, 0, 0))
///     .unwrap();
/// let mut feed = LiveFeed::new(&engine, UserLocation::default(), start, 5, 2).unwrap();
/// let mut rng = FixedSource::new(0.5);
///
/// let mut stamps = Vec::new();
/// while let Some(report) = feed.next_report(&mut rng) {
///     stamps.push(report.unwrap().generated_at.format("%H:%M:%S").to_string());
/// }
/// assert_eq!(stamps, ["08:00:00", "08:00:05"]);
/// ```
pub struct LiveFeed<'a> {
    engine: &'a ForecastEngine,
    location: UserLocation,
    start: NaiveDateTime,
    cadence: TimeDelta,
    next_tick: usize,
    refreshes: usize,
}

impl<'a> LiveFeed<'a> {
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidCadence`] if `cadence_secs` exceeds
    /// [`MAX_REFRESH_SECS`].
    pub fn new(
        engine: &'a ForecastEngine,
        location: UserLocation,
        start: NaiveDateTime,
        cadence_secs: u64,
        refreshes: usize,
    ) -> Result<Self> {
        let cadence = Some(cadence_secs)
            .filter(|&s| s <= MAX_REFRESH_SECS)
            .and_then(|s| i64::try_from(s).ok())
            .and_then(TimeDelta::try_seconds)
            .ok_or(ForecastError::InvalidCadence(cadence_secs))?;
        Ok(Self {
            engine,
            location,
            start,
            cadence,
            next_tick: 0,
            refreshes,
        })
    }

    /// Wall-clock offset between refreshes.
    pub fn cadence(&self) -> TimeDelta {
        self.cadence
    }

    /// Whether another report is pending.
    pub fn has_next(&self) -> bool {
        self.next_tick < self.refreshes
    }

    /// Next report, or `None` when every refresh has been produced.
    ///
    /// A tick whose timestamp falls outside the representable date range
    /// yields [`ForecastError::ClockOverflow`].
    pub fn next_report<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<Result<ForecastReport>> {
        if !self.has_next() {
            return None;
        }
        let tick = self.next_tick;
        self.next_tick += 1;

        let Some(now) = self.tick_time(tick) else {
            return Some(Err(ForecastError::ClockOverflow { tick }));
        };
        tracing::debug!(tick, %now, "live refresh");
        Some(self.engine.run(&self.location, now, rng))
    }

    fn tick_time(&self, tick: usize) -> Option<NaiveDateTime> {
        let offset = self.cadence.checked_mul(i32::try_from(tick).ok()?)?;
        self.start.checked_add_signed(offset)
    }
}
