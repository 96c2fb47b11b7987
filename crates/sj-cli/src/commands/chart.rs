//! The 30-day sleep chart, as a terminal table.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use sj_core::{ChartPoint, chart_points};

use crate::Config;
use crate::commands::{authed_client, runtime};

/// How many of the most recent days are charted.
const CHART_DAYS: usize = 30;

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let client = authed_client(config)?;
    let entries = runtime()?
        .block_on(client.entries())
        .context("failed to fetch entries")?;

    let points = chart_points(&entries);
    let window = recent_window(&points);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(window)?)?;
        return Ok(());
    }

    if window.is_empty() {
        writeln!(writer, "no sleep data yet")?;
        return Ok(());
    }

    for point in window {
        let date = point.date.with_timezone(&Local).format("%b %e");
        writeln!(
            writer,
            "{date}  {:>4.1}h  {:<11}  {}",
            point.display_hours(),
            point.quality.to_string(),
            bar(point)
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "optimal = 7-8 hours inclusive")?;
    Ok(())
}

/// The trailing [`CHART_DAYS`] points of a date-sorted chart.
fn recent_window(points: &[ChartPoint]) -> &[ChartPoint] {
    let skip = points.len().saturating_sub(CHART_DAYS);
    &points[skip..]
}

/// One `#` per display hour, capped at a day.
fn bar(point: &ChartPoint) -> String {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "hours are clamped to 0..=24 first"
    )]
    let len = point.display_hours().clamp(0.0, 24.0).round() as usize;
    "#".repeat(len)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sj_core::SleepQuality;

    use super::*;

    fn point(day: u32, hours: f64) -> ChartPoint {
        ChartPoint {
            date: Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap(),
            total_hours: hours,
            quality: SleepQuality::classify(hours),
            summary: String::new(),
        }
    }

    #[test]
    fn window_keeps_everything_under_thirty_days() {
        let points: Vec<_> = (1..=10).map(|d| point(d, 7.0)).collect();
        assert_eq!(recent_window(&points).len(), 10);
    }

    #[test]
    fn window_keeps_only_the_most_recent_thirty() {
        let points: Vec<_> = (1..=30).chain(1..=10).map(|d| point(d, 7.0)).collect();
        let window = recent_window(&points);
        assert_eq!(window.len(), 30);
        assert_eq!(window[0].date, points[10].date);
    }

    #[test]
    fn bar_length_tracks_hours() {
        assert_eq!(bar(&point(1, 7.5)), "#".repeat(8));
        assert_eq!(bar(&point(1, 0.0)), "");
    }
}
