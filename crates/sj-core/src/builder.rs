//! Entry builder: resolves form drafts into absolute sleep periods.
//!
//! The form records wall-clock times only. This module anchors them to a
//! reference date (today or yesterday, local midnight) and applies overnight
//! rollover: an end clock earlier than the start clock means the sleep ran
//! into the next calendar day.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

use crate::entry::{IntervalDraft, SleepPeriod};
use crate::types::{ClockTime, ParseClockTimeError};

/// Which day an entry is being recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceDay {
    #[default]
    Today,
    Yesterday,
}

impl ReferenceDay {
    /// String form used on the wire and in CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
        }
    }

    /// Resolves the reference day to a calendar date.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Yesterday => today - Duration::days(1),
        }
    }
}

impl std::fmt::Display for ReferenceDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error parsing a [`ReferenceDay`] from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("reference day must be \"today\" or \"yesterday\", got {value:?}")]
pub struct UnknownReferenceDay {
    value: String,
}

impl std::str::FromStr for ReferenceDay {
    type Err = UnknownReferenceDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            _ => Err(UnknownReferenceDay {
                value: s.to_string(),
            }),
        }
    }
}

/// Errors building sleep periods from drafts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Every draft was missing a start or end clock time.
    #[error("no complete sleep interval was provided")]
    NoCompleteInterval,

    /// A filled-in clock field did not parse.
    #[error(transparent)]
    ClockTime(#[from] ParseClockTimeError),

    /// Start and end clocks were identical, which would make a zero-length
    /// period.
    #[error("sleep interval has zero length at {clock}")]
    ZeroLength { clock: ClockTime },
}

/// Converts a local date and wall-clock time to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_to_utc(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&date.and_time(time)) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap: shift forward one hour, which is
            // guaranteed to exist
            let shifted = date.and_time(time) + Duration::hours(1);
            match Local.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                LocalResult::None => Utc.from_utc_datetime(&shifted),
            }
        }
    }
}

fn clock_to_naive(clock: ClockTime) -> NaiveTime {
    NaiveTime::from_hms_opt(u32::from(clock.hour()), u32::from(clock.minute()), 0)
        .unwrap_or(NaiveTime::MIN)
}

/// Local midnight of the reference date, as a UTC timestamp. This is the
/// `date` field the backend stores for the whole entry.
#[must_use]
pub fn entry_date(day: ReferenceDay, today: NaiveDate) -> DateTime<Utc> {
    local_to_utc(day.resolve(today), NaiveTime::MIN)
}

/// Resolves form drafts into absolute sleep periods.
///
/// Incomplete drafts (an empty start or end field) are dropped. If nothing
/// remains, the caller must not submit: that is
/// [`BuildError::NoCompleteInterval`].
///
/// For each kept draft, both clocks are anchored to the reference date. An
/// end clock numerically before the start clock rolls over to the next
/// calendar day; a sleep period is assumed never to exceed 24 hours.
///
/// Pure and deterministic for a fixed `today`: the same inputs always yield
/// the same timestamps.
pub fn build_periods(
    day: ReferenceDay,
    today: NaiveDate,
    drafts: &[IntervalDraft],
) -> Result<Vec<SleepPeriod>, BuildError> {
    let complete: Vec<&IntervalDraft> = drafts.iter().filter(|d| d.is_complete()).collect();
    if complete.is_empty() {
        return Err(BuildError::NoCompleteInterval);
    }

    let base = day.resolve(today);
    let mut periods = Vec::with_capacity(complete.len());
    for draft in complete {
        let start_clock: ClockTime = draft.start.parse()?;
        let end_clock: ClockTime = draft.end.parse()?;
        if start_clock == end_clock {
            return Err(BuildError::ZeroLength { clock: start_clock });
        }

        let start = local_to_utc(base, clock_to_naive(start_clock));
        // Rollover keeps the wall-clock end time and moves it to the next day
        let end_date = if end_clock < start_clock {
            base + Duration::days(1)
        } else {
            base
        };
        let end = local_to_utc(end_date, clock_to_naive(end_clock));

        let period = SleepPeriod::new(start, end, draft.extra)
            .map_err(|_| BuildError::ZeroLength { clock: start_clock })?;
        periods.push(period);
    }

    tracing::debug!(day = %day, count = periods.len(), "built sleep periods");
    Ok(periods)
}

/// [`build_periods`] anchored to the current local date.
pub fn build_periods_now(
    day: ReferenceDay,
    drafts: &[IntervalDraft],
) -> Result<Vec<SleepPeriod>, BuildError> {
    build_periods(day, Local::now().date_naive(), drafts)
}
