//! Record a day's sleep intervals and journal summary.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use sj_api::EntryPayload;
use sj_core::{IntervalDraft, ReferenceDay, build_periods, entry_date, total_hours};

use crate::Config;
use crate::commands::{authed_client, runtime};

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    day: ReferenceDay,
    sleep: &[String],
    nap: &[String],
    summary: &str,
) -> Result<()> {
    let mut drafts = Vec::with_capacity(sleep.len() + nap.len());
    for raw in sleep {
        drafts.push(parse_interval(raw, false)?);
    }
    for raw in nap {
        drafts.push(parse_interval(raw, true)?);
    }

    let today = Local::now().date_naive();
    let periods =
        build_periods(day, today, &drafts).context("could not build sleep intervals")?;
    let payload = EntryPayload::new(entry_date(day, today), summary, &periods);

    let client = authed_client(config)?;
    runtime()?
        .block_on(client.create_entry(&payload))
        .context("failed to submit entry")?;

    writeln!(
        writer,
        "recorded {} interval(s), {:.1}h total, for {day}",
        periods.len(),
        total_hours(&periods)
    )?;
    Ok(())
}

/// Splits a `HH:MM-HH:MM` argument into a draft. Clock validation itself
/// happens in the entry builder.
fn parse_interval(raw: &str, extra: bool) -> Result<IntervalDraft> {
    let (start, end) = raw
        .split_once('-')
        .with_context(|| format!("interval must be HH:MM-HH:MM, got {raw:?}"))?;
    let draft = IntervalDraft::new(start.trim(), end.trim());
    Ok(if extra { draft.extra() } else { draft })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_interval_splits_on_dash() {
        let draft = parse_interval("23:00-07:00", false).unwrap();
        assert_eq!(draft.start, "23:00");
        assert_eq!(draft.end, "07:00");
        assert!(!draft.extra);
    }

    #[test]
    fn parse_interval_marks_naps_extra() {
        let draft = parse_interval("14:00-15:00", true).unwrap();
        assert!(draft.extra);
    }

    #[test]
    fn parse_interval_rejects_missing_dash() {
        assert!(parse_interval("23:00", false).is_err());
    }

    #[test]
    fn parse_interval_keeps_incomplete_halves_for_the_builder() {
        // "-07:00" is a draft with an empty start; the builder drops it.
        let draft = parse_interval("-07:00", false).unwrap();
        assert!(!draft.is_complete());
    }
}
