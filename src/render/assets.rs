//! Static asset constants.

/// Stylesheet for the board, inlined into every rendered page.
pub const CSS: &str = include_str!("styles.css");
