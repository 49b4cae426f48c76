//! User location, the enrichment collaborator contract, and the persisted
//! last-known location.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::geo::Coordinate;

/// Storage key for the last known location.
pub const LOCATION_STORE_KEY: &str = "user-location";

/// Label used when a location has neither a name nor a city.
pub const UNNAMED_AREA: &str = "Your Area";

/// A coordinate plus whatever place details are known about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for UserLocation {
    /// New York City.
    fn default() -> Self {
        Self {
            name: Some("New York City".to_string()),
            ..Self::at(40.7128, -74.006)
        }
    }
}

impl UserLocation {
    /// A bare coordinate with no place details.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
            population: None,
            state: None,
            country: None,
            city: None,
            timezone: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// Name, else city, else [`UNNAMED_AREA`].
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.city.as_deref())
            .unwrap_or(UNNAMED_AREA)
            .to_string()
    }

    fn with_details(mut self, details: LocationDetails) -> Self {
        self.name = Some(details.name);
        self.population = details.population;
        self.state = details.state;
        self.country = details.country;
        self.city = details.city;
        self.timezone = details.timezone;
        self
    }
}

/// Place details returned by a [`LocationEnricher`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub name: String,
    pub population: Option<u64>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub timezone: Option<String>,
}

/// Reverse-geocoding collaborator. Only ever decorates a location; the
/// forecast needs nothing beyond the coordinate.
pub trait LocationEnricher {
    /// Looks up place details for `at`.
    ///
    /// # Errors
    ///
    /// Any failure; callers fall back to a coordinate label.
    fn enrich(&self, at: &Coordinate) -> Result<LocationDetails>;
}

/// Enricher for builds without a geocoding backend. Always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineEnricher;

impl LocationEnricher for OfflineEnricher {
    fn enrich(&self, _at: &Coordinate) -> Result<LocationDetails> {
        Err(ForecastError::Enrichment(
            "no geocoding backend configured".to_string(),
        ))
    }
}

/// Fallback display name for an unresolved coordinate.
pub fn coordinate_label(at: &Coordinate) -> String {
    format!("Location ({at})")
}

/// Builds a [`UserLocation`] for `at`, enriching it when possible.
///
/// Enrichment failures are logged and replaced by [`coordinate_label`]; they
/// never reach the caller.
pub fn resolve_location(at: Coordinate, enricher: &dyn LocationEnricher) -> UserLocation {
    let base = UserLocation::at(at.lat, at.lng);
    match enricher.enrich(&at) {
        Ok(details) => base.with_details(details),
        Err(e) => {
            tracing::warn!("location enrichment failed for ({at}): {e}");
            UserLocation {
                name: Some(coordinate_label(&at)),
                ..base
            }
        }
    }
}

/// Persists the last known location as JSON in a directory.
#[derive(Debug, Clone)]
pub struct LocationStore {
    path: PathBuf,
}

impl LocationStore {
    /// Store backed by `<dir>/user-location.json`.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{LOCATION_STORE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved location.
    ///
    /// A missing file is `Ok(None)`. A corrupt file is deleted and also
    /// reported as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read or removed.
    pub fn load(&self) -> Result<Option<UserLocation>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<UserLocation>(&content) {
            Ok(loc) => Ok(Some(loc)),
            Err(e) => {
                tracing::warn!(
                    "discarding unreadable saved location {}: {e}",
                    self.path.display()
                );
                fs::remove_file(&self.path)?;
                Ok(None)
            }
        }
    }

    /// Writes `location`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error if the write fails.
    pub fn save(&self, location: &UserLocation) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(location)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
