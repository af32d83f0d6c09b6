//! Attendance report models.
//!
//! This module contains the derived structures produced while aggregating
//! punches: the per-day [`DayBucket`], the rendered [`DayReportRow`], and the
//! [`PeriodReport`] covering a whole date range. None of these are persisted;
//! they are rebuilt for every report request.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, PunchEvent};

/// All punches of one employee on one calendar date.
///
/// Events are sorted by timestamp ascending; punches sharing a timestamp keep
/// the order in which they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    /// The local calendar date shared by every event.
    pub date: NaiveDate,
    /// The day's events in chronological order.
    pub events: Vec<PunchEvent>,
}

impl DayBucket {
    /// Number of punches recorded on this day.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the bucket holds no punches.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// One entry/exit display position in a report row.
///
/// Either side may be absent, e.g. an entry whose exit was never punched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPair {
    /// Time of the n-th entry punch of the day.
    pub entry: Option<NaiveTime>,
    /// Time of the n-th exit punch of the day.
    pub exit: Option<NaiveTime>,
}

/// A single day's line in a period report.
///
/// `slots` and `total_duration` are derived independently from the same
/// sorted bucket: slots show the first entries and exits in chronological
/// order, while the total only counts greedily matched entry/exit pairs. On
/// anomalous days (e.g. two entries in a row) the slots can show a punch that
/// contributed nothing to the total; `unpaired_events` counts those punches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReportRow {
    /// The calendar date of the row.
    pub date: NaiveDate,
    /// Entry/exit display slots, always exactly the configured slot count.
    pub slots: Vec<SlotPair>,
    /// Worked time in whole minutes.
    pub worked_minutes: i64,
    /// Worked time formatted as `H:MM`.
    pub total_duration: String,
    /// Signed difference against the standard workday (`+H:MM`, `-H:MM` or `0:00`).
    pub overtime: String,
    /// Number of punches recorded on the day.
    pub event_count: usize,
    /// Punches skipped by the pairing scan.
    pub unpaired_events: usize,
}

/// The attendance report for one employee over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// The employee the report is about.
    pub employee: Employee,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// When the report was produced, in the reference offset.
    pub generated_at: DateTime<FixedOffset>,
    /// Entry/exit slots in every row.
    pub slots_per_day: usize,
    /// One row per day with punches, sorted by date ascending.
    pub rows: Vec<DayReportRow>,
    /// Number of punches supplied for the period, displayed or not.
    pub total_record_count: usize,
    /// Sum of the daily worked minutes.
    pub total_worked_minutes: i64,
    /// The same sum expressed in decimal hours, rounded to two places.
    pub total_worked_hours: Decimal,
    /// True when the period has no punches; renderers show a "no records" notice.
    pub no_records: bool,
}

impl PeriodReport {
    /// Returns true if the period contained no punches.
    pub fn is_empty(&self) -> bool {
        self.no_records
    }
}
