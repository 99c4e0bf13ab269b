//! Data models for quakeboard.

mod earthquake;
mod metadata;
mod view_state;

pub use earthquake::{EarthquakeRecord, Feature, FeatureCollection, FeatureProperties};
pub use metadata::ApplicationMetadata;
pub use view_state::{ViewState, EARTHQUAKE_ERROR, METADATA_ERROR};
