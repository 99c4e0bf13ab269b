//! Shared utility functions.
//!
//! - `time`: epoch timestamp display in a configurable zone and format

mod time;

pub use time::{DisplayZone, TimeConfigError, TimeDisplay, DEFAULT_TIME_FORMAT};
