//! Calculation logic for the time-clock engine.
//!
//! This module contains punch type inference, grouping of punches by
//! calendar day, greedy entry/exit pairing with worked-duration totals,
//! overtime/deficit against the standard workday, and assembly of period
//! reports.

mod daily_duration;
mod day_grouping;
mod overtime;
mod punch_type;
mod report_builder;

pub use daily_duration::{
    DEFAULT_MAX_SLOTS, DailyDuration, WorkedDuration, compute_daily_duration, parse_duration,
};
pub use day_grouping::group_by_day;
pub use overtime::{
    DEFAULT_STANDARD_WORKDAY_MINUTES, OvertimeDelta, compute_delta, delta_for, try_compute_delta,
};
pub use punch_type::infer_next_type;
pub use report_builder::{ReportEngine, ReportSettings};
