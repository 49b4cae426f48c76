//! TOML-based forecast configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::forecast::{
    DEFAULT_HOURLY_LENGTH, DEFAULT_MAX_DISTANCE_KM, DEFAULT_TOP_N, EngineSettings, ForecastEngine,
};
use crate::geo::{Coordinate, GEO_OFFSET_SCALE};
use crate::live::{DEFAULT_REFRESH_SECS, MAX_REFRESH_SECS};
use crate::location::UserLocation;
use crate::zones::{Zone, city_zones};

/// Top-level forecast configuration parsed from TOML.
///
/// All sections have defaults matching the `nyc` preset. Load from TOML with
/// [`ForecastConfig::from_toml_file`] or use [`ForecastConfig::nyc`] for the
/// built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// User coordinate and optional place name.
    #[serde(default)]
    pub location: LocationConfig,
    /// Engine tunables.
    #[serde(default)]
    pub forecast: ForecastSettings,
    /// Live refresh cadence.
    #[serde(default)]
    pub live: LiveConfig,
    /// Custom zone list; the built-in city fixture when absent.
    #[serde(default)]
    pub zones: Option<Vec<Zone>>,
}

/// User coordinate and optional place name.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Display name; resolved from the coordinate when absent.
    pub name: Option<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        let nyc = UserLocation::default();
        Self {
            lat: nyc.lat,
            lng: nyc.lng,
            name: nyc.name,
        }
    }
}

/// Engine tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastSettings {
    /// Search radius (km). Non-positive selects the fallback zones.
    pub max_distance_km: f64,
    /// Points in the short-horizon hourly series (must be > 0).
    pub hourly_length: usize,
    /// Ranked best-time slots (must be > 0).
    pub top_n: usize,
    /// Degrees per planar unit when placing zones (must be > 0).
    pub geo_scale: f64,
    /// Random seed; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            hourly_length: DEFAULT_HOURLY_LENGTH,
            top_n: DEFAULT_TOP_N,
            geo_scale: GEO_OFFSET_SCALE,
            seed: None,
        }
    }
}

/// Live refresh cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LiveConfig {
    /// Seconds between refreshes, 1 to 86400.
    pub refresh_secs: u64,
    /// Number of reports to produce.
    pub refreshes: usize,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            refresh_secs: DEFAULT_REFRESH_SECS,
            refreshes: 1,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"forecast.top_n"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ForecastConfig {
    /// New York City with the default radius.
    pub fn nyc() -> Self {
        Self::default()
    }

    /// London; both grid-centre zones fall inside the radius at this latitude.
    pub fn london() -> Self {
        Self {
            location: LocationConfig {
                lat: 51.5074,
                lng: -0.1278,
                name: Some("London".to_string()),
            },
            ..Self::default()
        }
    }

    /// Sydney with a widened radius.
    pub fn sydney() -> Self {
        Self {
            location: LocationConfig {
                lat: -33.8688,
                lng: 151.2093,
                name: Some("Sydney".to_string()),
            },
            forecast: ForecastSettings {
                max_distance_km: 25.0,
                ..ForecastSettings::default()
            },
            ..Self::default()
        }
    }

    /// Zero radius: always served by the fallback zones.
    pub fn fallback() -> Self {
        Self {
            forecast: ForecastSettings {
                max_distance_km: 0.0,
                ..ForecastSettings::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["nyc", "london", "sydney", "fallback"];

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "nyc" => Ok(Self::nyc()),
            "london" => Ok(Self::london()),
            "sydney" => Ok(Self::sydney()),
            "fallback" => Ok(Self::fallback()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Zones the engine should use.
    pub fn zone_list(&self) -> Vec<Zone> {
        self.zones.clone().unwrap_or_else(city_zones)
    }

    /// Engine settings from the `[forecast]` section.
    pub fn engine_settings(&self) -> EngineSettings {
        let f = &self.forecast;
        EngineSettings {
            max_distance_km: f.max_distance_km,
            hourly_length: f.hourly_length,
            top_n: f.top_n,
            geo_scale: f.geo_scale,
        }
    }

    /// Builds an engine over [`Self::zone_list`].
    pub fn build_engine(&self) -> ForecastEngine {
        ForecastEngine::new(self.zone_list(), self.engine_settings())
    }

    /// The configured location, without enrichment.
    pub fn user_location(&self) -> UserLocation {
        UserLocation {
            name: self.location.name.clone(),
            ..UserLocation::at(self.location.lat, self.location.lng)
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let loc = &self.location;
        if Coordinate::new(loc.lat, loc.lng).is_err() {
            errors.push(ConfigError::new(
                "location",
                format!(
                    "({}, {}) is not a valid coordinate: lat in [-90, 90], lng in [-180, 180]",
                    loc.lat, loc.lng
                ),
            ));
        }

        let f = &self.forecast;
        if f.max_distance_km.is_nan() {
            errors.push(ConfigError::new("forecast.max_distance_km", "must be a number"));
        }
        if f.hourly_length == 0 {
            errors.push(ConfigError::new("forecast.hourly_length", "must be > 0"));
        }
        if f.top_n == 0 {
            errors.push(ConfigError::new("forecast.top_n", "must be > 0"));
        }
        if !(f.geo_scale > 0.0 && f.geo_scale.is_finite()) {
            errors.push(ConfigError::new("forecast.geo_scale", "must be > 0"));
        }

        if self.live.refresh_secs == 0 || self.live.refresh_secs > MAX_REFRESH_SECS {
            errors.push(ConfigError::new(
                "live.refresh_secs",
                format!("must be in [1, {MAX_REFRESH_SECS}]"),
            ));
        }

        if let Some(zones) = &self.zones {
            if zones.is_empty() {
                errors.push(ConfigError::new("zones", "must contain at least one zone"));
            }
            let mut seen = HashSet::new();
            for (i, z) in zones.iter().enumerate() {
                if !seen.insert(z.id.as_str()) {
                    errors.push(ConfigError::new(
                        format!("zones[{i}].id"),
                        format!("duplicate zone id \"{}\"", z.id),
                    ));
                }
                for (name, value) in [
                    ("safety_score", z.safety_score),
                    ("traffic_level", z.traffic_level),
                    ("business_activity", z.business_activity),
                ] {
                    if value > 100 {
                        errors.push(ConfigError::new(
                            format!("zones[{i}].{name}"),
                            "must be in [0, 100]",
                        ));
                    }
                }
                let p = z.coordinates;
                if !(0.0..=100.0).contains(&p.x) || !(0.0..=100.0).contains(&p.y) {
                    errors.push(ConfigError::new(
                        format!("zones[{i}].coordinates"),
                        "x and y must be in [0, 100]",
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::CrowdLevel;

    #[test]
    fn default_preset_valid() {
        let cfg = ForecastConfig::nyc();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "nyc should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ForecastConfig::from_preset("atlantis");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert!(e.message.contains("london"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ForecastConfig::PRESETS {
            let cfg = ForecastConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[location]
lat = 48.8566
lng = 2.3522
name = "Paris"

[forecast]
max_distance_km = 15.0
hourly_length = 12
top_n = 4
geo_scale = 0.02
seed = 99

[live]
refresh_secs = 10
refreshes = 3

[[zones]]
id = "a"
name = "Old Town"
crowd_level = "critical"
safety_score = 70
traffic_level = 90
active_events = 4
business_activity = 60
coordinates = { x = 50.0, y = 50.0 }

[[zones]]
id = "b"
name = "Riverside"
crowd_level = "low"
safety_score = 92
traffic_level = 20
active_events = 0
business_activity = 35
coordinates = { x = 40.0, y = 55.0 }
"#;
        let cfg = ForecastConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.forecast.hourly_length), Some(12));
        assert_eq!(cfg.as_ref().and_then(|c| c.forecast.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| c.live.refreshes), Some(3));
        let zones = cfg.as_ref().map(ForecastConfig::zone_list).unwrap_or_default();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].crowd_level, CrowdLevel::Critical);
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[forecast]
top_n = 3
bogus_field = true
"#;
        assert!(ForecastConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[forecast]
seed = 7
"#;
        let cfg = ForecastConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().and_then(|c| c.forecast.seed), Some(7));
        assert_eq!(cfg.as_ref().map(|c| c.forecast.top_n), Some(DEFAULT_TOP_N));
        assert_eq!(cfg.as_ref().map(|c| c.location.lat), Some(40.7128));
        assert_eq!(cfg.as_ref().map(|c| c.zone_list().len()), Some(10));
    }

    #[test]
    fn validation_catches_bad_location() {
        let mut cfg = ForecastConfig::nyc();
        cfg.location.lat = 95.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "location"));
    }

    #[test]
    fn validation_catches_zero_lengths() {
        let mut cfg = ForecastConfig::nyc();
        cfg.forecast.hourly_length = 0;
        cfg.forecast.top_n = 0;
        cfg.live.refresh_secs = 0;
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"forecast.hourly_length".to_string()));
        assert!(fields.contains(&"forecast.top_n".to_string()));
        assert!(fields.contains(&"live.refresh_secs".to_string()));
    }

    #[test]
    fn validation_rejects_oversized_refresh_interval() {
        let cfg = ForecastConfig::from_toml_str("[live]\nrefresh_secs = 10000000000000000\n");
        let errors = cfg.map(|c| c.validate()).unwrap_or_default();
        assert!(errors.iter().any(|e| e.field == "live.refresh_secs"));

        let mut cfg = ForecastConfig::nyc();
        cfg.live.refresh_secs = MAX_REFRESH_SECS;
        assert!(cfg.validate().is_empty());
        cfg.live.refresh_secs = MAX_REFRESH_SECS + 1;
        assert_eq!(cfg.validate().len(), 1);
    }

    #[test]
    fn validation_catches_bad_scale() {
        let mut cfg = ForecastConfig::nyc();
        cfg.forecast.geo_scale = 0.0;
        assert!(cfg.validate().iter().any(|e| e.field == "forecast.geo_scale"));
    }

    #[test]
    fn validation_catches_duplicate_and_out_of_range_zones() {
        let mut zones = city_zones();
        zones[1].id = zones[0].id.clone();
        zones[2].traffic_level = 140;
        zones[3].coordinates.x = 120.0;
        let cfg = ForecastConfig {
            zones: Some(zones),
            ..ForecastConfig::nyc()
        };
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"zones[1].id".to_string()));
        assert!(fields.contains(&"zones[2].traffic_level".to_string()));
        assert!(fields.contains(&"zones[3].coordinates".to_string()));
    }

    #[test]
    fn validation_rejects_empty_zone_list() {
        let cfg = ForecastConfig {
            zones: Some(Vec::new()),
            ..ForecastConfig::nyc()
        };
        assert!(cfg.validate().iter().any(|e| e.field == "zones"));
    }

    #[test]
    fn user_location_carries_name() {
        let loc = ForecastConfig::london().user_location();
        assert_eq!(loc.display_name(), "London");
        assert_eq!(loc.lat, 51.5074);
    }
}
