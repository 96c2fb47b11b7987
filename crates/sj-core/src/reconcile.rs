//! Reconciliation: applying an edited daily total back onto a day's
//! original sleep periods, and the edit lifecycle around it.
//!
//! When a user edits the aggregate total for a day they do not re-enter
//! individual clock times. The edited total is divided evenly across however
//! many periods the day originally had; each period keeps its start and only
//! the end moves.

use chrono::Duration;
use thiserror::Error;

use crate::entry::SleepPeriod;

/// Errors redistributing an edited total.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReconcileError {
    /// The day had no periods to spread the total across.
    #[error("cannot redistribute hours across a day with no sleep periods")]
    NoPeriods,

    /// The edited total was not a usable number of hours.
    #[error("edited total must be a positive number of hours, got {hours}")]
    InvalidTotal { hours: f64 },
}

/// Spreads `new_total_hours` evenly across the original periods.
///
/// Start timestamps (and the extra flag) are preserved; each end becomes
/// `start + new_total / count` hours. A day with zero periods is an error,
/// never a division by zero, as are non-finite or non-positive totals.
#[expect(
    clippy::cast_possible_truncation,
    reason = "millisecond share of a <=24h total fits i64"
)]
pub fn redistribute(
    periods: &[SleepPeriod],
    new_total_hours: f64,
) -> Result<Vec<SleepPeriod>, ReconcileError> {
    if periods.is_empty() {
        return Err(ReconcileError::NoPeriods);
    }
    if !new_total_hours.is_finite() || new_total_hours <= 0.0 {
        return Err(ReconcileError::InvalidTotal {
            hours: new_total_hours,
        });
    }

    #[expect(clippy::cast_precision_loss, reason = "period counts are tiny")]
    let share_ms = (new_total_hours / periods.len() as f64 * 3_600_000.0).round() as i64;
    let share = Duration::milliseconds(share_ms);

    let mut updated = Vec::with_capacity(periods.len());
    for period in periods {
        let end = period.start() + share;
        let rebuilt = SleepPeriod::new(period.start(), end, period.is_extra()).map_err(|_| {
            // A positive share always lands after the start; keep the error
            // mapped for completeness.
            ReconcileError::InvalidTotal {
                hours: new_total_hours,
            }
        })?;
        updated.push(rebuilt);
    }

    tracing::debug!(
        count = updated.len(),
        total_hours = new_total_hours,
        "redistributed edited total"
    );
    Ok(updated)
}

/// Edit lifecycle of a selected entry.
///
/// `Viewing -> Editing -> Saved` on success, or back to `Viewing` on cancel.
/// `Saved` means the backing collection is stale: the caller must reload it
/// from the backend before trusting local state again. There is no
/// optimistic merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditLifecycle {
    #[default]
    Viewing,
    Editing,
    Saved,
}

/// An edit-lifecycle transition that is not allowed from the current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot {action} while {from}")]
pub struct InvalidTransition {
    from: &'static str,
    action: &'static str,
}

impl EditLifecycle {
    const fn name(self) -> &'static str {
        match self {
            Self::Viewing => "viewing",
            Self::Editing => "editing",
            Self::Saved => "awaiting reload",
        }
    }

    /// Enters edit mode.
    pub const fn begin_edit(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Viewing => Ok(Self::Editing),
            _ => Err(InvalidTransition {
                from: self.name(),
                action: "begin editing",
            }),
        }
    }

    /// Abandons the edit, restoring the original values.
    pub const fn cancel(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Editing => Ok(Self::Viewing),
            _ => Err(InvalidTransition {
                from: self.name(),
                action: "cancel",
            }),
        }
    }

    /// Records a successful save. The collection is stale until reloaded.
    pub const fn save(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Editing => Ok(Self::Saved),
            _ => Err(InvalidTransition {
                from: self.name(),
                action: "save",
            }),
        }
    }

    /// Acknowledges that the collection has been reloaded after a save.
    pub const fn reloaded(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Saved => Ok(Self::Viewing),
            _ => Err(InvalidTransition {
                from: self.name(),
                action: "acknowledge reload",
            }),
        }
    }

    /// Whether local state must be treated as stale.
    #[must_use]
    pub const fn is_stale(self) -> bool {
        matches!(self, Self::Saved)
    }
}
