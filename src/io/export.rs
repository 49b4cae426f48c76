//! CSV export for forecast series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::forecast::{ForecastPoint, HourlyPoint};

/// Column header for the hourly series export.
pub const HOURLY_HEADER: [&str; 4] = ["hour_label", "hour_of_day", "crowd_pct", "recommended"];

/// Column header for the 24-hour series export.
pub const FORECAST_HEADER: [&str; 4] = ["hour_label", "predicted_pct", "actual_pct", "zone"];

/// Exports the hourly series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_hourly_csv(points: &[HourlyPoint], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_hourly_csv(points, io::BufWriter::new(file))
}

/// Writes the hourly series as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_hourly_csv(points: &[HourlyPoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HOURLY_HEADER)?;
    for p in points {
        wtr.write_record(&[
            p.hour_label.clone(),
            p.hour_of_day.to_string(),
            p.crowd_percent.to_string(),
            p.is_recommended.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the 24-hour series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_forecast_csv(points: &[ForecastPoint], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_forecast_csv(points, io::BufWriter::new(file))
}

/// Writes the 24-hour series as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_forecast_csv(points: &[ForecastPoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(FORECAST_HEADER)?;
    for p in points {
        wtr.write_record(&[
            p.hour_label.clone(),
            p.predicted_percent.to_string(),
            p.actual_percent.to_string(),
            p.zone_label.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
