//! City zone records, the built-in fixture, and per-query derived zones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, PlanarPoint};
use crate::random::RandomSource;

/// Number of zone cards shown alongside a forecast.
pub const ZONE_CARD_COUNT: usize = 4;

/// Symmetric jitter applied to a card's traffic level on every refresh.
const CARD_TRAFFIC_JITTER: f64 = 20.0;

/// Qualitative crowd density of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl CrowdLevel {
    /// Crowd percentage used when averaging zones into a baseline.
    pub fn percent(self) -> f64 {
        match self {
            CrowdLevel::Low => 25.0,
            CrowdLevel::Moderate => 50.0,
            CrowdLevel::High => 75.0,
            CrowdLevel::Critical => 95.0,
        }
    }

    /// Short advice shown on a zone card.
    pub fn advice(self) -> &'static str {
        match self {
            CrowdLevel::Low => "Best time now",
            CrowdLevel::Moderate => "Good",
            CrowdLevel::High => "Avoid",
            CrowdLevel::Critical => "Very busy",
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrowdLevel::Low => "low",
            CrowdLevel::Moderate => "moderate",
            CrowdLevel::High => "high",
            CrowdLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Static descriptive record for one city zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub crowd_level: CrowdLevel,
    /// 0–100.
    pub safety_score: u8,
    /// 0–100.
    pub traffic_level: u8,
    pub active_events: u32,
    /// 0–100.
    pub business_activity: u8,
    /// Planar grid position, 0–100 on both axes.
    pub coordinates: PlanarPoint,
}

/// A zone placed relative to a query coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyZone {
    #[serde(flatten)]
    pub zone: Zone,
    /// Great-circle distance from the query coordinate (km).
    pub distance_km: f64,
    /// Synthesized geographic position for this query only.
    pub position: Coordinate,
}

impl fmt::Display for NearbyZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:>5.1} km | crowd={:<8} traffic={:>3}% safety={:>3} events={}",
            self.zone.name,
            self.distance_km,
            self.zone.crowd_level.to_string(),
            self.zone.traffic_level,
            self.zone.safety_score,
            self.zone.active_events,
        )
    }
}

/// A zone card with a refreshed traffic reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSnapshot {
    pub id: String,
    pub name: String,
    pub crowd_level: CrowdLevel,
    /// Jittered traffic level, 10–100.
    pub traffic_level: u8,
    pub advice: &'static str,
}

impl fmt::Display for ZoneSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} expected crowd {:>3}% ({})",
            self.name, self.traffic_level, self.advice
        )
    }
}

/// Builds zone cards for the first [`ZONE_CARD_COUNT`] nearby zones.
pub fn live_zone_snapshots<R: RandomSource + ?Sized>(
    nearby: &[NearbyZone],
    rng: &mut R,
) -> Vec<ZoneSnapshot> {
    nearby
        .iter()
        .take(ZONE_CARD_COUNT)
        .map(|nz| {
            let jittered = f64::from(nz.zone.traffic_level) + rng.symmetric(CARD_TRAFFIC_JITTER);
            ZoneSnapshot {
                id: nz.zone.id.clone(),
                name: nz.zone.name.clone(),
                crowd_level: nz.zone.crowd_level,
                traffic_level: jittered.round().clamp(10.0, 100.0) as u8,
                advice: nz.zone.crowd_level.advice(),
            }
        })
        .collect()
}

#[expect(clippy::too_many_arguments)]
fn zone(
    id: &str,
    name: &str,
    crowd_level: CrowdLevel,
    safety_score: u8,
    traffic_level: u8,
    active_events: u32,
    business_activity: u8,
    (x, y): (f64, f64),
) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
        crowd_level,
        safety_score,
        traffic_level,
        active_events,
        business_activity,
        coordinates: PlanarPoint { x, y },
    }
}

/// The built-in ten-zone city fixture.
pub fn city_zones() -> Vec<Zone> {
    use CrowdLevel::{Critical, High, Low, Moderate};

    vec![
        zone("1", "Downtown Core", High, 78, 85, 5, 94, (45.0, 35.0)),
        zone("2", "Tech District", Moderate, 91, 62, 2, 88, (65.0, 25.0)),
        zone("3", "Harbor Front", High, 85, 45, 8, 76, (30.0, 60.0)),
        zone("4", "University Zone", Critical, 88, 72, 12, 65, (75.0, 45.0)),
        zone("5", "Financial Hub", Moderate, 95, 78, 1, 98, (50.0, 50.0)),
        zone("6", "Arts Quarter", Low, 82, 35, 6, 71, (25.0, 40.0)),
        zone("7", "Residential North", Low, 94, 28, 0, 45, (55.0, 15.0)),
        zone("8", "Industrial Park", Low, 76, 55, 0, 82, (85.0, 65.0)),
        zone("9", "Central Park", Moderate, 89, 15, 4, 32, (40.0, 45.0)),
        zone("10", "Shopping District", High, 86, 68, 3, 92, (55.0, 70.0)),
    ]
}
