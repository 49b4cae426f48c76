//! Error taxonomy for the forecast pipeline.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by the forecast engine and its supporting I/O.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Baseline aggregation or slot ranking was handed zero zones.
    #[error("no zones available to aggregate")]
    EmptyZoneSet,

    /// Latitude or longitude outside the valid geographic range.
    #[error("invalid coordinate ({lat}, {lng}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Start hour outside `0..=23`.
    #[error("invalid hour of day {0}: must be in 0..=23")]
    InvalidHour(u32),

    /// Live refresh cadence outside `1..=86400` seconds.
    #[error("invalid refresh cadence {0}s: must be at most 86400")]
    InvalidCadence(u64),

    /// A live refresh tick landed outside the representable date range.
    #[error("refresh tick {tick} is past the supported date range")]
    ClockOverflow { tick: usize },

    /// The location enrichment collaborator could not resolve a place.
    #[error("location enrichment unavailable: {0}")]
    Enrichment(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ForecastError>;
