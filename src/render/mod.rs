//! HTML rendering of the board.
//!
//! The page is self-contained: the stylesheet is inlined and every value
//! from the catalog is escaped by the templates.

mod assets;
mod templates;

pub use assets::CSS;

use askama::Template;
use thiserror::Error;

use crate::models::ViewState;
use templates::{PageTemplate, TableSectionTemplate};

pub const PAGE_HEADING: &str = "Datos de Terremotos";
pub const LOADING_MESSAGE: &str = "Cargando datos...";
pub const EMPTY_PLACEHOLDER: &str = "No hay datos disponibles";
pub const REFRESH_LABEL: &str = "Recargar";

pub const CATALOGS_TITLE: &str = "Catálogos";
pub const CONTRIBUTORS_TITLE: &str = "Contribuyentes";
pub const PRODUCT_TYPES_TITLE: &str = "Tipos de Productos";
pub const EVENT_TYPES_TITLE: &str = "Tipos de Eventos";
pub const MAGNITUDE_TYPES_TITLE: &str = "Tipos de Magnitud";
pub const EARTHQUAKES_TITLE: &str = "Datos de Terremotos";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Page-level rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    /// Reload the page every N seconds while the event query is pending.
    pub auto_refresh: Option<u32>,
    /// Show a button that POSTs to `/refresh`. Only meaningful when served.
    pub refresh_button: bool,
}

/// Render one table section: a row per item numbered from 1, or the
/// placeholder when `items` is empty.
pub fn render_table_section(title: &str, items: &[String]) -> Result<String, RenderError> {
    let template = TableSectionTemplate {
        title,
        items,
        placeholder: EMPTY_PLACEHOLDER,
    };
    Ok(template.render()?)
}

/// Render the whole board for a view.
pub fn render_page(view: &ViewState, options: &PageOptions) -> Result<String, RenderError> {
    let lines = view.earthquake_lines();
    let tables: [(&str, &[String]); 6] = [
        (CATALOGS_TITLE, view.catalogs.as_slice()),
        (CONTRIBUTORS_TITLE, view.contributors.as_slice()),
        (PRODUCT_TYPES_TITLE, view.producttypes.as_slice()),
        (EVENT_TYPES_TITLE, view.eventtypes.as_slice()),
        (MAGNITUDE_TYPES_TITLE, view.magnitudetypes.as_slice()),
        (EARTHQUAKES_TITLE, lines.as_slice()),
    ];

    let sections = tables
        .iter()
        .map(|(title, items)| render_table_section(title, items))
        .collect::<Result<Vec<_>, _>>()?;

    let template = PageTemplate {
        heading: PAGE_HEADING,
        css: CSS,
        loading: view.loading,
        loading_message: LOADING_MESSAGE,
        error: view.visible_error(),
        refresh_seconds: if view.loading { options.auto_refresh } else { None },
        refresh_button: options.refresh_button,
        refresh_label: REFRESH_LABEL,
        sections,
    };
    Ok(template.render()?)
}
