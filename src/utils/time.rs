//! Epoch timestamp display.

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Utc};
use thiserror::Error;

/// en-US style numeric date and 12-hour time, e.g. `1/1/2014, 12:00:00 AM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Placeholder for timestamps that are missing or out of range.
const UNKNOWN_TIME: &str = "n/a";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeConfigError {
    #[error("Invalid time zone '{0}': expected 'local', 'utc', or an offset like +02:00")]
    InvalidZone(String),

    #[error("Invalid time format '{0}'")]
    InvalidFormat(String),
}

/// Time zone used when displaying event times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local time zone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl FromStr for DisplayZone {
    type Err = TimeConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(DisplayZone::Local),
            "utc" | "z" => return Ok(DisplayZone::Utc),
            _ => {}
        }
        parse_offset(trimmed)
            .map(DisplayZone::Fixed)
            .ok_or_else(|| TimeConfigError::InvalidZone(s.to_string()))
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => write!(f, "local"),
            DisplayZone::Utc => write!(f, "utc"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Formats epoch-millisecond timestamps for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDisplay {
    zone: DisplayZone,
    format: String,
}

impl Default for TimeDisplay {
    fn default() -> Self {
        Self {
            zone: DisplayZone::Local,
            format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl TimeDisplay {
    /// Create a display, rejecting strftime patterns chrono cannot render.
    pub fn new(zone: DisplayZone, format: &str) -> Result<Self, TimeConfigError> {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(TimeConfigError::InvalidFormat(format.to_string()));
        }
        Ok(Self {
            zone,
            format: format.to_string(),
        })
    }

    pub fn utc() -> Self {
        Self {
            zone: DisplayZone::Utc,
            ..Self::default()
        }
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    pub fn format_str(&self) -> &str {
        &self.format
    }

    /// Format an epoch-millisecond timestamp.
    pub fn format_millis(&self, millis: Option<i64>) -> String {
        match millis.and_then(DateTime::<Utc>::from_timestamp_millis) {
            Some(dt) => self.format_datetime(dt),
            None => UNKNOWN_TIME.to_string(),
        }
    }

    fn format_datetime(&self, dt: DateTime<Utc>) -> String {
        match self.zone {
            DisplayZone::Local => dt.with_timezone(&Local).format(&self.format).to_string(),
            DisplayZone::Utc => dt.format(&self.format).to_string(),
            DisplayZone::Fixed(offset) => dt.with_timezone(&offset).format(&self.format).to_string(),
        }
    }
}
