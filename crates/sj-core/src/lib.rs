//! Core domain logic for the sleep journal.
//!
//! This crate contains the pure, synchronous logic the client is built on:
//! - Entry building: resolving `HH:MM` form drafts against a reference day,
//!   with overnight rollover
//! - Aggregation: per-day sleep totals and optimal/sub-optimal classification
//! - Reconciliation: spreading an edited daily total back across a day's
//!   original periods
//!
//! It performs no I/O; the network and rendering layers sit around it.

mod aggregate;
mod builder;
mod entry;
mod reconcile;
pub mod types;

pub use aggregate::{
    ChartPoint, OPTIMAL_MAX_HOURS, OPTIMAL_MIN_HOURS, SleepQuality, Statistics, chart_points,
    total_hours,
};
pub use builder::{
    BuildError, ReferenceDay, UnknownReferenceDay, build_periods, build_periods_now, entry_date,
};
pub use entry::{DailyEntry, IntervalDraft, SleepPeriod};
pub use reconcile::{EditLifecycle, InvalidTransition, ReconcileError, redistribute};
