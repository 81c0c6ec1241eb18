//! Satellite position types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default observer latitude (Bristol, UK).
pub const DEFAULT_OBSERVER_LATITUDE: f64 = 51.45;

/// Default observer longitude (Bristol, UK).
pub const DEFAULT_OBSERVER_LONGITUDE: f64 = -2.59;

/// Ground location the satellite position is computed relative to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl ObserverLocation {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_OBSERVER_LATITUDE,
            longitude: DEFAULT_OBSERVER_LONGITUDE,
        }
    }
}

/// A single reported satellite position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatellitePosition {
    pub satellite_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

impl SatellitePosition {
    /// The observation time, if the timestamp is representable.
    #[must_use]
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Coordinates formatted with hemisphere letters, e.g. `51.4500° N, 2.5900° W`.
    #[must_use]
    pub fn formatted_coordinates(&self) -> String {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.4}° {ns}, {:.4}° {ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }

    /// Rough "where is it now" label for display.
    #[must_use]
    pub fn region(&self) -> &'static str {
        region_label(self.longitude)
    }
}

/// Map a longitude onto a rough region name.
///
/// Flavor text only. The ranges overlap and are checked in order, so the
/// last matching range wins.
#[must_use]
pub fn region_label(longitude: f64) -> &'static str {
    let mut region = "somewhere over the ocean";

    if (-170.0..=-30.0).contains(&longitude) {
        region = "over the Americas";
    }
    if (-60.0..=-10.0).contains(&longitude) {
        region = "over the Atlantic Ocean";
    }
    if (-20.0..=60.0).contains(&longitude) {
        region = "over Europe or Africa";
    }
    if (40.0..=150.0).contains(&longitude) {
        region = "over Asia";
    }
    if (110.0..=180.0).contains(&longitude) || (-180.0..=-120.0).contains(&longitude) {
        region = "over the Pacific Ocean";
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(latitude: f64, longitude: f64) -> SatellitePosition {
        SatellitePosition {
            satellite_name: "SPACE STATION".to_string(),
            latitude,
            longitude,
            altitude_km: 418.2,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn default_observer_is_bristol() {
        let observer = ObserverLocation::default();
        assert!((observer.latitude - 51.45).abs() < f64::EPSILON);
        assert!((observer.longitude + 2.59).abs() < f64::EPSILON);
    }

    #[test]
    fn formats_hemispheres() {
        assert_eq!(
            position(51.45, -2.59).formatted_coordinates(),
            "51.4500° N, 2.5900° W"
        );
        assert_eq!(
            position(-33.9, 151.2).formatted_coordinates(),
            "33.9000° S, 151.2000° E"
        );
    }

    #[test]
    fn observed_at_converts_unix_seconds() {
        let at = position(0.0, 0.0).observed_at().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn later_ranges_override_earlier_ones() {
        // -50 is inside both the Americas and Atlantic ranges.
        assert_eq!(region_label(-50.0), "over the Atlantic Ocean");
        // 50 is inside both Europe/Africa and Asia.
        assert_eq!(region_label(50.0), "over Asia");
        // 120 is inside both Asia and Pacific.
        assert_eq!(region_label(120.0), "over the Pacific Ocean");
    }

    #[test]
    fn unmatched_longitudes_fall_back_to_ocean() {
        assert_eq!(region_label(f64::NAN), "somewhere over the ocean");
        assert_eq!(region_label(-100.0), "over the Americas");
        assert_eq!(region_label(-175.0), "over the Pacific Ocean");
        assert_eq!(position(10.0, 5.0).region(), "over Europe or Africa");
    }
}
