//! Controlled-vocabulary metadata from `application.json`.

use serde::{Deserialize, Deserializer, Serialize};

/// Lookup lists describing how the catalog service classifies its data.
///
/// Every list is optional upstream; a missing or `null` field becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationMetadata {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub catalogs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contributors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub producttypes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub eventtypes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub magnitudetypes: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
