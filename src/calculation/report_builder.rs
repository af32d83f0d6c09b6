//! Period report assembly.
//!
//! The [`ReportEngine`] ties the day grouper, the pairing calculator and the
//! overtime calculator together into a [`PeriodReport`]. It holds the
//! deployment settings (standard workday, slot count, reference offset) so
//! they are fixed at construction rather than read from globals.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{DayBucket, DayReportRow, Employee, PeriodReport, PunchEvent};

use super::daily_duration::{DEFAULT_MAX_SLOTS, compute_daily_duration};
use super::day_grouping::group_by_day;
use super::overtime::{DEFAULT_STANDARD_WORKDAY_MINUTES, delta_for};

/// Settings that shape every report the engine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    /// Length of the standard workday in minutes.
    pub standard_workday_minutes: i64,
    /// Number of entry/exit slots shown per day.
    pub max_slots: usize,
    /// Offset that local dates and times are expressed in.
    pub reference_offset: FixedOffset,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            standard_workday_minutes: DEFAULT_STANDARD_WORKDAY_MINUTES,
            max_slots: DEFAULT_MAX_SLOTS,
            reference_offset: FixedOffset::west_opt(4 * 3600).expect("Valid UTC-4 offset"),
        }
    }
}

/// Builds attendance reports from raw punches.
///
/// The engine is stateless between calls; every report allocates its own
/// buckets and rows, so one engine can serve concurrent requests.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::{ReportEngine, ReportSettings};
/// use timeclock_engine::models::{Employee, PunchEvent, PunchType};
/// use chrono::{DateTime, NaiveDate};
///
/// let engine = ReportEngine::new(ReportSettings::default());
/// let employee = Employee {
///     id: 1,
///     username: "msilva".to_string(),
///     full_name: None,
///     cpf: None,
///     role: None,
/// };
/// let punch = |id, punch_type, ts| PunchEvent {
///     id,
///     employee_id: 1,
///     punch_type,
///     timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
/// };
/// let events = vec![
///     punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
///     punch(2, PunchType::Exit, "2025-03-10T16:30:00-04:00"),
/// ];
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let report = engine.build_report(&employee, day, day, &events);
/// assert_eq!(report.rows[0].total_duration, "8:30");
/// assert_eq!(report.rows[0].overtime, "+0:30");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportEngine {
    settings: ReportSettings,
}

impl ReportEngine {
    /// Creates an engine with the given settings.
    pub fn new(settings: ReportSettings) -> Self {
        Self { settings }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Builds a report stamped with the current time.
    ///
    /// `events` are expected to be already restricted to the period; the
    /// engine does not filter them.
    pub fn build_report(
        &self,
        employee: &Employee,
        period_start: NaiveDate,
        period_end: NaiveDate,
        events: &[PunchEvent],
    ) -> PeriodReport {
        let now = Utc::now().with_timezone(&self.settings.reference_offset);
        self.build_report_at(employee, period_start, period_end, events, now)
    }

    /// Builds a report with an explicit generation timestamp.
    pub fn build_report_at(
        &self,
        employee: &Employee,
        period_start: NaiveDate,
        period_end: NaiveDate,
        events: &[PunchEvent],
        generated_at: DateTime<FixedOffset>,
    ) -> PeriodReport {
        let rows: Vec<DayReportRow> = group_by_day(events.iter().cloned())
            .into_values()
            .map(|bucket| self.build_row(&bucket))
            .collect();

        let total_worked_minutes: i64 = rows.iter().map(|row| row.worked_minutes).sum();

        debug!(
            employee_id = employee.id,
            days = rows.len(),
            records = events.len(),
            total_worked_minutes,
            "Built period report"
        );

        PeriodReport {
            employee: employee.clone(),
            period_start,
            period_end,
            generated_at,
            no_records: rows.is_empty(),
            slots_per_day: self.settings.max_slots,
            rows,
            total_record_count: events.len(),
            total_worked_minutes,
            total_worked_hours: minutes_to_hours(total_worked_minutes),
        }
    }

    /// Builds the report row for a single day.
    pub fn build_row(&self, bucket: &DayBucket) -> DayReportRow {
        let daily = compute_daily_duration(bucket, self.settings.max_slots);
        let delta = delta_for(daily.duration, self.settings.standard_workday_minutes);

        DayReportRow {
            date: bucket.date,
            slots: daily.slots,
            worked_minutes: daily.duration.minutes(),
            total_duration: daily.duration.to_string(),
            overtime: delta.to_string(),
            event_count: bucket.len(),
            unpaired_events: daily.unpaired_events,
        }
    }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PunchType, SlotPair};
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn employee() -> Employee {
        Employee {
            id: 1,
            username: "msilva".to_string(),
            full_name: Some("Maria Silva".to_string()),
            cpf: Some("123.456.789-00".to_string()),
            role: Some("Analyst".to_string()),
        }
    }

    fn punch(id: u64, punch_type: PunchType, ts: &str) -> PunchEvent {
        PunchEvent {
            id,
            employee_id: 1,
            punch_type,
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generated_at() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-03-31T18:00:00-04:00").unwrap()
    }

    fn build(events: &[PunchEvent]) -> PeriodReport {
        ReportEngine::default().build_report_at(
            &employee(),
            date(2025, 3, 1),
            date(2025, 3, 31),
            events,
            generated_at(),
        )
    }

    #[test]
    fn test_empty_period_is_flagged() {
        let report = build(&[]);

        assert!(report.is_empty());
        assert!(report.rows.is_empty());
        assert_eq!(report.total_record_count, 0);
        assert_eq!(report.total_worked_minutes, 0);
        assert_eq!(report.total_worked_hours, Decimal::ZERO);
    }

    #[test]
    fn test_rows_sorted_by_date_regardless_of_input_order() {
        let report = build(&[
            punch(3, PunchType::Entry, "2025-03-12T08:00:00-04:00"),
            punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
            punch(4, PunchType::Exit, "2025-03-12T15:00:00-04:00"),
            punch(2, PunchType::Exit, "2025-03-10T17:00:00-04:00"),
        ]);

        assert!(!report.is_empty());
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].date, date(2025, 3, 10));
        assert_eq!(report.rows[0].total_duration, "9:00");
        assert_eq!(report.rows[0].overtime, "+1:00");
        assert_eq!(report.rows[1].date, date(2025, 3, 12));
        assert_eq!(report.rows[1].total_duration, "7:00");
        assert_eq!(report.rows[1].overtime, "-1:00");
        assert_eq!(report.total_worked_minutes, 16 * 60);
        assert_eq!(report.total_worked_hours, Decimal::from(16));
    }

    #[test]
    fn test_record_count_includes_punches_beyond_slot_cap() {
        let mut events = Vec::new();
        for i in 0..5 {
            let hour = 7 + i * 2;
            events.push(punch(
                (i * 2) as u64,
                PunchType::Entry,
                &format!("2025-03-10T{:02}:00:00-04:00", hour),
            ));
            events.push(punch(
                (i * 2 + 1) as u64,
                PunchType::Exit,
                &format!("2025-03-10T{:02}:30:00-04:00", hour),
            ));
        }

        let report = build(&events);

        assert_eq!(report.total_record_count, 10);
        assert_eq!(report.rows[0].event_count, 10);
        assert_eq!(report.rows[0].slots.len(), 4);
        assert_eq!(
            report.rows[0].slots[3],
            SlotPair {
                entry: NaiveTime::from_hms_opt(13, 0, 0),
                exit: NaiveTime::from_hms_opt(13, 30, 0),
            }
        );
        assert_eq!(report.rows[0].total_duration, "2:30");
    }

    #[test]
    fn test_anomalous_day_keeps_display_and_total_independent() {
        let report = build(&[
            punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
            punch(2, PunchType::Entry, "2025-03-10T09:00:00-04:00"),
            punch(3, PunchType::Exit, "2025-03-10T17:00:00-04:00"),
        ]);

        let row = &report.rows[0];
        assert_eq!(row.total_duration, "8:00");
        assert_eq!(row.overtime, "0:00");
        assert_eq!(row.slots[0].entry, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(row.unpaired_events, 1);
    }

    #[test]
    fn test_day_with_only_an_entry_reports_zero_not_deficit() {
        let report = build(&[punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00")]);

        assert_eq!(report.rows[0].total_duration, "0:00");
        assert_eq!(report.rows[0].overtime, "0:00");
    }

    #[test]
    fn test_settings_drive_threshold_and_slots() {
        let engine = ReportEngine::new(ReportSettings {
            standard_workday_minutes: 360,
            max_slots: 2,
            reference_offset: FixedOffset::east_opt(0).unwrap(),
        });

        let report = engine.build_report_at(
            &employee(),
            date(2025, 3, 10),
            date(2025, 3, 10),
            &[
                punch(1, PunchType::Entry, "2025-03-10T08:00:00Z"),
                punch(2, PunchType::Exit, "2025-03-10T15:00:00Z"),
            ],
            generated_at(),
        );

        assert_eq!(report.rows[0].overtime, "+1:00");
        assert_eq!(report.rows[0].slots.len(), 2);
    }

    #[test]
    fn test_total_hours_rounded_to_two_places() {
        let report = build(&[
            punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
            punch(2, PunchType::Exit, "2025-03-10T08:20:00-04:00"),
        ]);

        assert_eq!(report.total_worked_hours, Decimal::from_str("0.33").unwrap());
    }
}
