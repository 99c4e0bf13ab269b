//! The aggregate shown by the board.

use serde::Serialize;

use super::{ApplicationMetadata, EarthquakeRecord};

/// Shown when the `application.json` request fails.
pub const METADATA_ERROR: &str = "No se pudieron cargar los datos de la aplicación";

/// Shown when the event query fails.
pub const EARTHQUAKE_ERROR: &str = "No se pudieron cargar los datos de los terremotos";

/// Everything the page renders.
///
/// Each request's completion merges only its own fields. `loading` tracks
/// the event query alone; `error` is a single slot, so the failure that
/// settles last is the one displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub catalogs: Vec<String>,
    pub contributors: Vec<String>,
    pub producttypes: Vec<String>,
    pub eventtypes: Vec<String>,
    pub magnitudetypes: Vec<String>,
    pub earthquakes: Vec<EarthquakeRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            catalogs: Vec::new(),
            contributors: Vec::new(),
            producttypes: Vec::new(),
            eventtypes: Vec::new(),
            magnitudetypes: Vec::new(),
            earthquakes: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl ViewState {
    pub fn apply_metadata(&mut self, meta: ApplicationMetadata) {
        self.catalogs = meta.catalogs;
        self.contributors = meta.contributors;
        self.producttypes = meta.producttypes;
        self.eventtypes = meta.eventtypes;
        self.magnitudetypes = meta.magnitudetypes;
    }

    pub fn fail_metadata(&mut self) {
        self.error = Some(METADATA_ERROR.to_string());
    }

    pub fn apply_earthquakes(&mut self, records: Vec<EarthquakeRecord>) {
        self.earthquakes = records;
        self.loading = false;
    }

    pub fn fail_earthquakes(&mut self) {
        self.error = Some(EARTHQUAKE_ERROR.to_string());
        self.loading = false;
    }

    /// One display string per event, in response order.
    pub fn earthquake_lines(&self) -> Vec<String> {
        self.earthquakes.iter().map(|r| r.display_line()).collect()
    }

    /// The error message, hidden while the event query is still pending.
    pub fn visible_error(&self) -> Option<&str> {
        if self.loading {
            None
        } else {
            self.error.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> EarthquakeRecord {
        EarthquakeRecord {
            id: id.to_string(),
            place: Some(format!("Place {}", id)),
            magnitude: Some(3.1),
            time: "1/1/2014, 12:00:00 AM".to_string(),
        }
    }

    fn metadata() -> ApplicationMetadata {
        ApplicationMetadata {
            catalogs: vec!["us".to_string()],
            contributors: vec!["us".to_string(), "ak".to_string()],
            producttypes: vec!["origin".to_string()],
            eventtypes: vec!["earthquake".to_string()],
            magnitudetypes: vec!["mw".to_string()],
        }
    }

    #[test]
    fn test_default_is_loading_and_empty() {
        let view = ViewState::default();
        assert!(view.loading);
        assert!(view.error.is_none());
        assert!(view.catalogs.is_empty());
        assert!(view.earthquake_lines().is_empty());
    }

    #[test]
    fn test_metadata_does_not_end_loading() {
        let mut view = ViewState::default();
        view.apply_metadata(metadata());
        assert!(view.loading);
        assert_eq!(view.contributors, vec!["us", "ak"]);
    }

    #[test]
    fn test_completion_order_does_not_matter() {
        let mut a = ViewState::default();
        a.apply_metadata(metadata());
        a.apply_earthquakes(vec![record("1"), record("2")]);

        let mut b = ViewState::default();
        b.apply_earthquakes(vec![record("1"), record("2")]);
        b.apply_metadata(metadata());

        assert_eq!(a, b);
        assert!(!a.loading);
    }

    #[test]
    fn test_metadata_failure_hidden_until_loading_ends() {
        let mut view = ViewState::default();
        view.fail_metadata();
        assert_eq!(view.visible_error(), None);
        assert!(view.catalogs.is_empty());

        view.apply_earthquakes(vec![record("1")]);
        assert_eq!(view.visible_error(), Some(METADATA_ERROR));
        assert_eq!(view.earthquake_lines().len(), 1);
    }

    #[test]
    fn test_earthquake_failure_ends_loading() {
        let mut view = ViewState::default();
        view.apply_metadata(metadata());
        view.fail_earthquakes();
        assert!(!view.loading);
        assert_eq!(view.visible_error(), Some(EARTHQUAKE_ERROR));
        assert!(view.earthquakes.is_empty());
        assert_eq!(view.catalogs, vec!["us"]);
    }

    #[test]
    fn test_last_failure_wins() {
        let mut view = ViewState::default();
        view.fail_earthquakes();
        view.fail_metadata();
        assert_eq!(view.visible_error(), Some(METADATA_ERROR));
    }

    #[test]
    fn test_lines_follow_record_order() {
        let mut view = ViewState::default();
        view.apply_earthquakes(vec![record("b"), record("a")]);
        assert_eq!(
            view.earthquake_lines(),
            vec![
                "1/1/2014, 12:00:00 AM - Place b (Magnitud: 3.1)",
                "1/1/2014, 12:00:00 AM - Place a (Magnitud: 3.1)",
            ]
        );
    }
}
