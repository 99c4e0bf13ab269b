//! URLs of the two catalog endpoints the board reads.

use url::Url;

pub const DEFAULT_API_BASE: &str = "https://earthquake.usgs.gov/fdsnws/event/1";
pub const DEFAULT_START_TIME: &str = "2014-01-01";
pub const DEFAULT_END_TIME: &str = "2014-01-02";

/// Resolved endpoint URLs for one catalog service and query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    application: Url,
    query: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        // The default base is a constant known to parse.
        Self::new(DEFAULT_API_BASE, DEFAULT_START_TIME, DEFAULT_END_TIME)
            .unwrap_or_else(|e| unreachable!("default API base is invalid: {}", e))
    }
}

impl Endpoints {
    /// Build endpoint URLs under `base`.
    ///
    /// `base` may be given with or without a trailing slash.
    pub fn new(base: &str, starttime: &str, endtime: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let application = base.join("application.json")?;

        let mut query = base.join("query")?;
        query
            .query_pairs_mut()
            .append_pair("format", "geojson")
            .append_pair("starttime", starttime)
            .append_pair("endtime", endtime);

        Ok(Self { application, query })
    }

    /// `application.json`: catalogs, contributors, product/event/magnitude types.
    pub fn application(&self) -> &Url {
        &self.application
    }

    /// GeoJSON event query for the configured window.
    pub fn query(&self) -> &Url {
        &self.query
    }
}
