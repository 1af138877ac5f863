use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ClockError {
    #[error("clock unavailable")]
    Unavailable,

    #[error("unparsable clock reading {0:?}")]
    Unparsable(String),
}

/// Source of the current instant. The tick task is its only caller.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<DateTime<Utc>, ClockError>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>, ClockError> {
        Ok(Utc::now())
    }
}

/// Parses an RFC 3339 reading such as `2025-07-05T12:00:00-04:00`.
pub fn parse_reading(raw: &str) -> Result<DateTime<Utc>, ClockError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ClockError::Unparsable(raw.to_string()))
}
