//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sj_core::ReferenceDay;

/// Sleep and journal tracker.
///
/// Records daily sleep intervals with a short journal summary against the
/// hosted backend, and charts the last 30 days of computed sleep duration.
#[derive(Debug, Parser)]
#[command(name = "sj", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in and store the bearer token.
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored bearer token.
    Logout,

    /// Show the signed-in user's profile.
    Whoami,

    /// Record a day's sleep intervals and journal summary.
    Log {
        /// Which day the entry is for.
        #[arg(long, default_value = "today")]
        day: ReferenceDay,

        /// A sleep interval as start-end clock times, e.g. 23:00-07:00.
        /// May be given more than once.
        #[arg(long, value_name = "HH:MM-HH:MM")]
        sleep: Vec<String>,

        /// An extra (nap) sleep interval, same format as --sleep.
        #[arg(long, value_name = "HH:MM-HH:MM")]
        nap: Vec<String>,

        /// Free-text journal summary for the day.
        #[arg(long, default_value = "")]
        summary: String,
    },

    /// Show the 30-day sleep chart.
    Chart {
        /// Emit the chart points as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show summary statistics over the charted days.
    Stats {
        /// Emit the statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Edit a past entry's total sleep hours and/or summary.
    Edit {
        /// The entry's calendar date, e.g. 2025-06-10.
        date: chrono::NaiveDate,

        /// New total sleep hours, spread evenly across the day's original
        /// intervals.
        #[arg(long)]
        hours: Option<f64>,

        /// New journal summary.
        #[arg(long)]
        summary: Option<String>,
    },
}
