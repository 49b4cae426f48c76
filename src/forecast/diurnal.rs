//! Hour-of-day multiplier bands shaping the synthetic crowd series.

/// One band of the daily crowd pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiurnalBand {
    pub name: &'static str,
    /// First hour in the band (inclusive).
    pub start_hour: u32,
    /// Hour the band ends (exclusive). Less than `start_hour` when it wraps midnight.
    pub end_hour: u32,
    /// Scales the aggregate baseline.
    pub multiplier: f64,
    /// Width of the uniform jitter added on top.
    pub jitter_amplitude: f64,
}

impl DiurnalBand {
    /// Whether `hour` falls in `[start_hour, end_hour)`, wrapping past midnight.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// An ordered band table plus the band used when no entry matches.
#[derive(Debug, Clone, Copy)]
pub struct DiurnalProfile {
    pub bands: &'static [DiurnalBand],
    pub fallback: DiurnalBand,
}

impl DiurnalProfile {
    /// First band containing `hour`, or the fallback.
    pub fn band_for(&self, hour: u32) -> &DiurnalBand {
        self.bands
            .iter()
            .find(|b| b.contains(hour))
            .unwrap_or(&self.fallback)
    }
}

const fn band(
    name: &'static str,
    start_hour: u32,
    end_hour: u32,
    multiplier: f64,
    jitter_amplitude: f64,
) -> DiurnalBand {
    DiurnalBand {
        name,
        start_hour,
        end_hour,
        multiplier,
        jitter_amplitude,
    }
}

/// Short-horizon hourly crowd pattern.
pub const HOURLY_PROFILE: DiurnalProfile = DiurnalProfile {
    bands: &[
        band("morning rush", 6, 10, 0.70, 25.0),
        band("midday", 10, 14, 0.90, 20.0),
        band("afternoon", 14, 18, 0.80, 25.0),
        band("evening peak", 18, 22, 1.10, 20.0),
        band("night", 22, 6, 0.40, 20.0),
    ],
    fallback: band("flat", 0, 0, 0.60, 0.0),
};

/// 24-hour predicted crowd pattern.
pub const FORECAST_PROFILE: DiurnalProfile = DiurnalProfile {
    bands: &[
        band("morning rush", 6, 10, 0.80, 20.0),
        band("midday", 10, 14, 1.00, 20.0),
        band("afternoon", 14, 18, 0.85, 25.0),
        band("evening peak", 18, 22, 1.15, 15.0),
        band("night", 22, 6, 0.50, 15.0),
    ],
    fallback: band("flat", 0, 0, 0.70, 0.0),
};
