//! HTTP request handlers for the web server.

mod api;
mod board;
mod static_files;

// Re-export handlers for use by the router
pub use api::{api_state, health};
pub use board::{board, refresh};
pub use static_files::serve_css;
