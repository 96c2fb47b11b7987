//! Summary statistics over the charted days.

use std::io::Write;

use anyhow::{Context, Result};
use sj_core::{Statistics, chart_points};

use crate::Config;
use crate::commands::{authed_client, runtime};

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let client = authed_client(config)?;
    let entries = runtime()?
        .block_on(client.entries())
        .context("failed to fetch entries")?;

    let points = chart_points(&entries);
    let Some(stats) = Statistics::from_points(&points) else {
        writeln!(writer, "no sleep data yet")?;
        return Ok(());
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    writeln!(writer, "total days:    {}", stats.total_days)?;
    writeln!(writer, "optimal days:  {}", stats.optimal_days)?;
    writeln!(writer, "average sleep: {:.1}h", stats.average_hours)?;
    writeln!(writer, "success rate:  {}%", stats.success_rate_pct)?;
    Ok(())
}
