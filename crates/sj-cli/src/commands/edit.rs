//! Edit a past entry: new total hours and/or a new summary.
//!
//! The edited total is spread evenly across the day's original intervals
//! (starts preserved); the clock times are never re-entered. After a
//! successful save, the collection is refetched rather than merged locally.

use std::io::Write;

use anyhow::{Context, Result, ensure};
use chrono::{Local, NaiveDate};
use sj_api::EntryPayload;
use sj_core::{DailyEntry, EditLifecycle, chart_points, redistribute};

use crate::Config;
use crate::commands::{authed_client, runtime};

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    date: NaiveDate,
    hours: Option<f64>,
    summary: Option<String>,
) -> Result<()> {
    ensure!(
        hours.is_some() || summary.is_some(),
        "nothing to edit: pass --hours and/or --summary"
    );

    let client = authed_client(config)?;
    let runtime = runtime()?;
    let entries = runtime
        .block_on(client.entries())
        .context("failed to fetch entries")?;
    let entry =
        find_by_date(&entries, date).with_context(|| format!("no entry found for {date}"))?;

    let state = EditLifecycle::default().begin_edit()?;

    let periods = match hours {
        Some(new_total) => redistribute(&entry.periods, new_total)?,
        None => entry.periods.clone(),
    };
    let summary = summary.unwrap_or_else(|| entry.summary.clone());
    let payload = EntryPayload::new(entry.date, summary, &periods);

    runtime
        .block_on(client.update_entry(&entry.id, &payload))
        .context("failed to update entry")?;
    let state = state.save()?;

    // Local state is stale until the backend is re-read; no optimistic merge.
    let reloaded = runtime
        .block_on(client.entries())
        .context("failed to reload entries after update")?;
    state.reloaded()?;

    match chart_points(&reloaded)
        .iter()
        .find(|p| p.date.with_timezone(&Local).date_naive() == date)
    {
        Some(point) => writeln!(
            writer,
            "{date}: {:.1}h ({})",
            point.display_hours(),
            point.quality
        )?,
        None => writeln!(writer, "{date}: updated")?,
    }
    Ok(())
}

/// Finds the entry recorded for a local calendar date. Entry dates are
/// stored as local midnight, so the comparison goes through local time.
fn find_by_date(entries: &[DailyEntry], date: NaiveDate) -> Option<&DailyEntry> {
    entries
        .iter()
        .find(|entry| entry.date.with_timezone(&Local).date_naive() == date)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sj_core::SleepPeriod;
    use sj_core::types::EntryId;

    use super::*;

    fn entry_on(date: NaiveDate) -> DailyEntry {
        let midnight = Local
            .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let start = midnight - chrono::Duration::hours(1);
        DailyEntry {
            id: EntryId::new("abc123").unwrap(),
            date: midnight,
            summary: String::new(),
            periods: vec![SleepPeriod::new(start, midnight, false).unwrap()],
        }
    }

    #[test]
    fn finds_entry_by_local_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let entries = [entry_on(date)];
        assert!(find_by_date(&entries, date).is_some());
        assert!(find_by_date(&entries, date.succ_opt().unwrap()).is_none());
    }
}
