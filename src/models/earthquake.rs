//! GeoJSON event query responses and the records derived from them.

use serde::{Deserialize, Serialize};

use crate::utils::TimeDisplay;

/// Placeholder for a missing place or magnitude.
const NOT_AVAILABLE: &str = "n/a";

/// A GeoJSON `FeatureCollection` as returned by the event query endpoint.
///
/// `features` is required: a body without it is a failed request, not an
/// empty result.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// One seismic event.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: String,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub mag: Option<f64>,
    /// Event origin time in epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
}

/// An event reshaped for display. Built once per feature, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRecord {
    pub id: String,
    pub place: Option<String>,
    pub magnitude: Option<f64>,
    pub time: String,
}

impl EarthquakeRecord {
    pub fn from_feature(feature: Feature, time: &TimeDisplay) -> Self {
        Self {
            id: feature.id,
            place: feature.properties.place,
            magnitude: feature.properties.mag,
            time: time.format_millis(feature.properties.time),
        }
    }

    /// `"{time} - {place} (Magnitud: {magnitude})"`.
    pub fn display_line(&self) -> String {
        let place = self.place.as_deref().unwrap_or(NOT_AVAILABLE);
        let magnitude = self
            .magnitude
            .map(|m| m.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        format!("{} - {} (Magnitud: {})", self.time, place, magnitude)
    }
}

impl FeatureCollection {
    pub fn into_records(self, time: &TimeDisplay) -> Vec<EarthquakeRecord> {
        self.features
            .into_iter()
            .map(|f| EarthquakeRecord::from_feature(f, time))
            .collect()
    }
}
