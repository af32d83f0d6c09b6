//! Tabular projection of a period report.
//!
//! [`ReportTable`] turns a [`PeriodReport`] into plain strings: a header
//! block, column headings, one row per day and a footer. Renderers only lay
//! these strings out.

use serde::Serialize;

use crate::models::{DayReportRow, PeriodReport};

/// Placeholder shown for an empty entry or exit slot.
pub const ABSENT_SLOT: &str = "-";

/// Value shown for optional employee fields that are not set.
pub const NOT_INFORMED: &str = "Not informed";

/// Line shown instead of the table when the period has no punches.
pub const NO_RECORDS_NOTICE: &str = "No punch records found in the period.";

/// A report flattened to display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    /// Report title.
    pub title: String,
    /// Header lines: employee, CPF, role, period and closing time.
    pub header_lines: Vec<String>,
    /// Column headings.
    pub columns: Vec<String>,
    /// One row per day; empty when the period has no punches.
    pub rows: Vec<Vec<String>>,
    /// Footer with the period's record count.
    pub footer: String,
}

impl ReportTable {
    /// Projects a report into display strings.
    ///
    /// Dates are `DD/MM/YYYY`, slot times `HH:MM`, and absent slots `-`.
    ///
    /// # Example
    ///
    /// ```
    /// use timeclock_engine::calculation::ReportEngine;
    /// use timeclock_engine::models::Employee;
    /// use timeclock_engine::render::ReportTable;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     username: "msilva".to_string(),
    ///     full_name: None,
    ///     cpf: None,
    ///     role: None,
    /// };
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let report = ReportEngine::default().build_report(&employee, day, day, &[]);
    ///
    /// let table = ReportTable::from_report(&report);
    /// assert_eq!(table.columns.len(), 11);
    /// assert!(table.rows.is_empty());
    /// assert_eq!(table.footer, "Total records in period: 0");
    /// ```
    pub fn from_report(report: &PeriodReport) -> Self {
        let employee = &report.employee;
        let header_lines = vec![
            format!("Employee: {}", employee.display_name()),
            format!("CPF: {}", employee.cpf.as_deref().unwrap_or(NOT_INFORMED)),
            format!("Role: {}", employee.role.as_deref().unwrap_or(NOT_INFORMED)),
            format!(
                "Period: {} to {}",
                report.period_start.format("%d/%m/%Y"),
                report.period_end.format("%d/%m/%Y")
            ),
            format!("Closed on: {}", report.generated_at.format("%d/%m/%Y %H:%M")),
        ];

        Self {
            title: "PUNCH REPORT".to_string(),
            header_lines,
            columns: columns(report.slots_per_day),
            rows: report.rows.iter().map(format_row).collect(),
            footer: format!("Total records in period: {}", report.total_record_count),
        }
    }
}

fn columns(slot_count: usize) -> Vec<String> {
    let mut columns = vec!["Date".to_string()];
    for n in 1..=slot_count {
        columns.push(format!("Entry {}", n));
        columns.push(format!("Exit {}", n));
    }
    columns.push("Total Hours".to_string());
    columns.push("Overtime".to_string());
    columns
}

fn format_row(row: &DayReportRow) -> Vec<String> {
    let time = |t: Option<chrono::NaiveTime>| {
        t.map_or_else(|| ABSENT_SLOT.to_string(), |t| t.format("%H:%M").to_string())
    };

    let mut cells = vec![row.date.format("%d/%m/%Y").to_string()];
    for slot in &row.slots {
        cells.push(time(slot.entry));
        cells.push(time(slot.exit));
    }
    cells.push(row.total_duration.clone());
    cells.push(row.overtime.clone());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ReportEngine;
    use crate::models::{Employee, PunchEvent, PunchType};
    use chrono::{DateTime, NaiveDate};

    fn employee() -> Employee {
        Employee {
            id: 1,
            username: "msilva".to_string(),
            full_name: Some("Maria Silva".to_string()),
            cpf: Some("123.456.789-00".to_string()),
            role: None,
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

    fn table_for(events: &[PunchEvent]) -> ReportTable {
        let report = ReportEngine::default().build_report_at(
            &employee(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            events,
            DateTime::parse_from_rfc3339("2025-04-01T09:15:00-04:00").unwrap(),
        );
        ReportTable::from_report(&report)
    }

    #[test]
    fn test_columns_follow_slot_count() {
        let table = table_for(&[]);
        assert_eq!(
            table.columns,
            vec![
                "Date", "Entry 1", "Exit 1", "Entry 2", "Exit 2", "Entry 3", "Exit 3", "Entry 4",
                "Exit 4", "Total Hours", "Overtime",
            ]
        );
    }

    #[test]
    fn test_header_lines_fall_back_to_not_informed() {
        let table = table_for(&[]);
        assert_eq!(
            table.header_lines,
            vec![
                "Employee: Maria Silva",
                "CPF: 123.456.789-00",
                "Role: Not informed",
                "Period: 01/03/2025 to 31/03/2025",
                "Closed on: 01/04/2025 09:15",
            ]
        );
    }

    #[test]
    fn test_row_cells_use_placeholders_for_absent_slots() {
        let table = table_for(&[
            punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
            punch(2, PunchType::Exit, "2025-03-10T12:00:00-04:00"),
            punch(3, PunchType::Entry, "2025-03-10T13:00:00-04:00"),
        ]);

        assert_eq!(
            table.rows,
            vec![vec![
                "10/03/2025", "08:00", "12:00", "13:00", "-", "-", "-", "-", "-", "4:00", "-4:00",
            ]]
        );
        assert_eq!(table.footer, "Total records in period: 3");
    }
}
