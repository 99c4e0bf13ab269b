//! Askama template structs.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;

/// A titled two-column table, or the empty-state placeholder.
#[derive(Template)]
#[template(path = "table_section.html")]
pub struct TableSectionTemplate<'a> {
    pub title: &'a str,
    pub items: &'a [String],
    pub placeholder: &'a str,
}

/// The full board page. `sections` are already-rendered HTML.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub heading: &'a str,
    pub css: &'a str,
    pub loading: bool,
    pub loading_message: &'a str,
    pub error: Option<&'a str>,
    pub refresh_seconds: Option<u32>,
    pub refresh_button: bool,
    pub refresh_label: &'a str,
    pub sections: Vec<String>,
}
