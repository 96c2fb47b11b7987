//! Aggregation: per-day sleep totals, quality classification, and the
//! derived chart data the rendering layer consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{DailyEntry, SleepPeriod};

/// Inclusive lower bound of the optimal nightly sleep range, in hours.
pub const OPTIMAL_MIN_HOURS: f64 = 7.0;

/// Inclusive upper bound of the optimal nightly sleep range, in hours.
pub const OPTIMAL_MAX_HOURS: f64 = 8.0;

/// Total sleep across all periods, in hours. Empty input is zero.
#[must_use]
pub fn total_hours(periods: &[SleepPeriod]) -> f64 {
    periods.iter().map(SleepPeriod::duration_hours).sum()
}

/// How a day's total sleep compares to the 7–8 hour policy range.
///
/// The range is a fixed product policy, inclusive at both ends. It is not
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Optimal,
    SubOptimal,
}

impl SleepQuality {
    /// Classifies a daily total.
    #[must_use]
    pub fn classify(hours: f64) -> Self {
        if (OPTIMAL_MIN_HOURS..=OPTIMAL_MAX_HOURS).contains(&hours) {
            Self::Optimal
        } else {
            Self::SubOptimal
        }
    }

    #[must_use]
    pub const fn is_optimal(self) -> bool {
        matches!(self, Self::Optimal)
    }
}

impl std::fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::SubOptimal => write!(f, "sub-optimal"),
        }
    }
}

/// One bar of the sleep chart: a day, its aggregated total, and its summary.
///
/// Derived data only; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    /// Full-precision total; round only for display.
    pub total_hours: f64,
    pub quality: SleepQuality,
    pub summary: String,
}

impl ChartPoint {
    /// Builds the point for a single entry.
    #[must_use]
    pub fn from_entry(entry: &DailyEntry) -> Self {
        let total = total_hours(&entry.periods);
        Self {
            date: entry.date,
            total_hours: total,
            quality: SleepQuality::classify(total),
            summary: entry.summary.clone(),
        }
    }

    /// Total rounded to one decimal, for display.
    #[must_use]
    pub fn display_hours(&self) -> f64 {
        (self.total_hours * 10.0).round() / 10.0
    }
}

/// Aggregates persisted entries into chart points, sorted ascending by date.
#[must_use]
pub fn chart_points(entries: &[DailyEntry]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = entries.iter().map(ChartPoint::from_entry).collect();
    points.sort_by_key(|point| point.date);
    points
}

/// Summary statistics over a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_days: usize,
    pub optimal_days: usize,
    /// Mean of the display-rounded daily totals.
    pub average_hours: f64,
    /// Share of optimal days, rounded to a whole percent.
    pub success_rate_pct: u32,
}

impl Statistics {
    /// Computes statistics, or `None` when there is nothing to chart.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "day counts are tiny")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "percentage is in 0..=100 after rounding"
    )]
    pub fn from_points(points: &[ChartPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let total_days = points.len();
        let optimal_days = points.iter().filter(|p| p.quality.is_optimal()).count();
        let average_hours =
            points.iter().map(ChartPoint::display_hours).sum::<f64>() / total_days as f64;
        let success_rate_pct = ((optimal_days as f64 / total_days as f64) * 100.0).round() as u32;
        Some(Self {
            total_days,
            optimal_days,
            average_hours,
            success_rate_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::EntryId;

    fn period(day: u32, start_h: u32, hours: i64) -> SleepPeriod {
        let start = Utc.with_ymd_and_hms(2025, 6, day, start_h, 0, 0).unwrap();
        SleepPeriod::new(start, start + chrono::Duration::hours(hours), false).unwrap()
    }

    fn entry(day: u32, periods: Vec<SleepPeriod>, summary: &str) -> DailyEntry {
        DailyEntry {
            id: EntryId::new(format!("entry-{day}")).unwrap(),
            date: Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap(),
            summary: summary.to_string(),
            periods,
        }
    }

    #[test]
    fn total_hours_of_empty_is_zero() {
        assert!(total_hours(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn total_hours_of_one_hour_period() {
        assert!((total_hours(&[period(10, 7, 1)]) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_hours_sums_multiple_periods() {
        let periods = [period(10, 23, 6), period(11, 14, 2)];
        assert!((total_hours(&periods) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn classify_is_inclusive_at_both_bounds() {
        assert_eq!(SleepQuality::classify(7.0), SleepQuality::Optimal);
        assert_eq!(SleepQuality::classify(8.0), SleepQuality::Optimal);
        assert_eq!(SleepQuality::classify(7.5), SleepQuality::Optimal);
        assert_eq!(SleepQuality::classify(6.99), SleepQuality::SubOptimal);
        assert_eq!(SleepQuality::classify(8.01), SleepQuality::SubOptimal);
        assert_eq!(SleepQuality::classify(0.0), SleepQuality::SubOptimal);
    }

    #[test]
    fn chart_points_sort_by_date() {
        let entries = [
            entry(12, vec![period(12, 23, 7)], "late"),
            entry(10, vec![period(10, 23, 5)], "early"),
        ];
        let points = chart_points(&entries);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].summary, "early");
        assert_eq!(points[1].summary, "late");
        assert!(points[0].date < points[1].date);
    }

    #[test]
    fn display_hours_rounds_to_one_decimal() {
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 23, 0, 0).unwrap();
        let end = start + chrono::Duration::minutes(7 * 60 + 20);
        let e = entry(
            10,
            vec![SleepPeriod::new(start, end, false).unwrap()],
            "",
        );
        let point = ChartPoint::from_entry(&e);
        assert!((point.display_hours() - 7.3).abs() < 1e-9);
        // Internal precision is retained
        assert!((point.total_hours - (7.0 + 20.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn overnight_scenario_classifies_optimal() {
        // 23:00 to 07:00 the next day: 8 hours, optimal.
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 23, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 11, 7, 0, 0).unwrap();
        let e = entry(10, vec![SleepPeriod::new(start, end, false).unwrap()], "");
        let point = ChartPoint::from_entry(&e);
        assert!((point.total_hours - 8.0).abs() < f64::EPSILON);
        assert_eq!(point.quality, SleepQuality::Optimal);
    }

    #[test]
    fn statistics_empty_is_none() {
        assert_eq!(Statistics::from_points(&[]), None);
    }

    #[test]
    fn statistics_counts_and_rates() {
        let entries = [
            entry(10, vec![period(10, 23, 7)], ""),
            entry(11, vec![period(11, 23, 5)], ""),
            entry(12, vec![period(12, 22, 8)], ""),
        ];
        let stats = Statistics::from_points(&chart_points(&entries)).unwrap();
        assert_eq!(stats.total_days, 3);
        assert_eq!(stats.optimal_days, 2);
        assert_eq!(stats.success_rate_pct, 67);
        assert!((stats.average_hours - (7.0 + 5.0 + 8.0) / 3.0).abs() < 1e-9);
    }
}
