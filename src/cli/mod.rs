//! Command-line interface.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run, write_page};
