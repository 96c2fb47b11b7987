//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A sleep period's end did not come after its start.
    #[error("sleep period end ({end}) must be after its start ({start})")]
    EndNotAfterStart { start: String, end: String },
}

/// Errors parsing a wall-clock `HH:MM` string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseClockTimeError {
    /// The string was not in `HH:MM` form.
    #[error("clock time must be HH:MM, got {value:?}")]
    Malformed { value: String },

    /// Hour or minute component was out of range.
    #[error("clock time out of range (hour < 24, minute < 60): {value:?}")]
    OutOfRange { value: String },
}

/// A wall-clock time of day (`HH:MM`), with no date component.
///
/// This is what a time input field produces: hour in `0..24`, minute in
/// `0..60`. It carries no timezone; the entry builder resolves it against a
/// reference date to obtain an absolute timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Creates a clock time after range validation.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ParseClockTimeError> {
        if hour >= 24 || minute >= 60 {
            return Err(ParseClockTimeError::OutOfRange {
                value: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Hour component, `0..24`.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Minute component, `0..60`.
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes_from_midnight(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseClockTimeError::Malformed {
            value: s.to_string(),
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour: u8 = hour.parse().map_err(|_| malformed())?;
        let minute: u8 = minute.parse().map_err(|_| malformed())?;
        Self::new(hour, minute).map_err(|_| ParseClockTimeError::OutOfRange {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

/// A validated entry identifier.
///
/// Entry IDs are assigned by the backend; this logic only requires them to be
/// non-empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(String);

impl EntryId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "entry ID" });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_parses_two_digit_fields() {
        let t: ClockTime = "23:05".parse().unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 5);
    }

    #[test]
    fn clock_time_parses_single_digit_hour() {
        let t: ClockTime = "7:30".parse().unwrap();
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn clock_time_rejects_garbage() {
        for input in ["", "7", "7:3", "7:300", "seven:30", "7-30", "7:am", ":30"] {
            assert!(
                input.parse::<ClockTime>().is_err(),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn clock_time_rejects_out_of_range() {
        assert!(matches!(
            "24:00".parse::<ClockTime>(),
            Err(ParseClockTimeError::OutOfRange { .. })
        ));
        assert!(matches!(
            "12:60".parse::<ClockTime>(),
            Err(ParseClockTimeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn clock_time_display_pads() {
        let t = ClockTime::new(7, 5).unwrap();
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn clock_time_minutes_from_midnight() {
        assert_eq!(
            ClockTime::new(23, 30).unwrap().minutes_from_midnight(),
            23 * 60 + 30
        );
        assert_eq!(ClockTime::new(0, 0).unwrap().minutes_from_midnight(), 0);
    }

    #[test]
    fn clock_time_serde_roundtrip() {
        let t = ClockTime::new(6, 45).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"06:45\"");
        let parsed: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, t);
    }

    #[test]
    fn entry_id_rejects_empty() {
        assert!(EntryId::new("").is_err());
        assert!(EntryId::new("66a1b2c3").is_ok());
    }

    #[test]
    fn entry_id_serde_rejects_empty() {
        let result: Result<EntryId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
