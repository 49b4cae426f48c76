//! File output for forecast series.

pub mod export;
