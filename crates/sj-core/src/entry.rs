//! Entry and interval value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EntryId, ValidationError};

/// A raw sleep interval as it sits in a form: two free-text clock fields and
/// an "extra sleep" (nap) flag.
///
/// Either field may still be empty. Drafts are immutable values; editing a
/// field produces a new draft rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalDraft {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub extra: bool,
}

impl IntervalDraft {
    /// Creates a draft from the two clock fields.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            extra: false,
        }
    }

    /// Marks the draft as extra (nap) sleep.
    #[must_use]
    pub fn extra(mut self) -> Self {
        self.extra = true;
        self
    }

    /// Whether both clock fields have been filled in.
    ///
    /// Incomplete drafts are skipped by the entry builder; they are not an
    /// error on their own.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.start.trim().is_empty() && !self.end.trim().is_empty()
    }
}

/// A sleep interval resolved to absolute timestamps.
///
/// Invariant: `end > start`, strictly. Overnight rollover has already been
/// applied by the time one of these exists, so the invariant is enforced at
/// construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr", into = "PeriodRepr")]
pub struct SleepPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    extra: bool,
}

impl SleepPeriod {
    /// Creates a period, rejecting `end <= start`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        extra: bool,
    ) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EndNotAfterStart {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end, extra })
    }

    /// When the sleep started.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// When the sleep ended. Always after [`start`](Self::start).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether this was extra (nap) sleep.
    #[must_use]
    pub const fn is_extra(&self) -> bool {
        self.extra
    }

    /// Length of the period in hours, full precision.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "durations are far below 2^52 ms")]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 3_600_000.0
    }
}

/// Serialized form of [`SleepPeriod`], used to re-validate on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PeriodRepr {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    extra: bool,
}

impl TryFrom<PeriodRepr> for SleepPeriod {
    type Error = ValidationError;

    fn try_from(repr: PeriodRepr) -> Result<Self, Self::Error> {
        Self::new(repr.start, repr.end, repr.extra)
    }
}

impl From<SleepPeriod> for PeriodRepr {
    fn from(period: SleepPeriod) -> Self {
        Self {
            start: period.start,
            end: period.end,
            extra: period.extra,
        }
    }
}

/// One persisted journal entry: a calendar day, its free-text summary, and
/// the sleep periods recorded for it.
///
/// Uniqueness of (user, date) is the backend's concern, not this crate's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: EntryId,
    pub date: DateTime<Utc>,
    pub summary: String,
    pub periods: Vec<SleepPeriod>,
}
