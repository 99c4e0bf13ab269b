//! quakeboard - seismic event board.
//!
//! Fetches application metadata and one day of events from the USGS FDSN
//! event service and renders them as HTML tables, either once to a file or
//! live from a small web server.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod render;
pub mod server;
pub mod session;
pub mod utils;
