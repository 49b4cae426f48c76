//! Location-aware crowd forecasting for a smart-city dashboard.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geo;
pub mod io;
/// Periodic forecast refresh driver.
pub mod live;
/// User location, enrichment fallback, and last-known-location storage.
pub mod location;
pub mod random;
pub mod zones;

pub use error::{ForecastError, Result};
pub use forecast::{ForecastEngine, ForecastReport};
