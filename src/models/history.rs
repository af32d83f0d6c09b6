//! Flat history records for punch listings.
//!
//! History views list punches most-recent-first together with the employee's
//! display name. [`project_history`] is the single place that maps the
//! domain entities onto that flat shape.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Employee, PunchEvent};

/// A punch flattened for display in a history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchHistoryRecord {
    /// The punch identifier.
    pub id: u64,
    /// The employee who punched.
    pub employee_id: u64,
    /// The employee's display name.
    pub employee_name: String,
    /// `"entry"` or `"exit"`.
    pub punch_type: String,
    /// The full timestamp in the reference offset.
    pub timestamp: DateTime<FixedOffset>,
    /// Local date formatted `DD/MM/YYYY`.
    pub date: String,
    /// Local time formatted `HH:MM`.
    pub time: String,
}

/// Projects a punch and its employee onto a [`PunchHistoryRecord`].
///
/// # Example
///
/// ```
/// use timeclock_engine::models::{project_history, Employee, PunchEvent, PunchType};
/// use chrono::DateTime;
///
/// let employee = Employee {
///     id: 5,
///     username: "rlima".to_string(),
///     full_name: Some("Rafael Lima".to_string()),
///     cpf: None,
///     role: None,
/// };
/// let event = PunchEvent {
///     id: 40,
///     employee_id: 5,
///     punch_type: PunchType::Exit,
///     timestamp: DateTime::parse_from_rfc3339("2025-03-10T17:05:00-04:00").unwrap(),
/// };
///
/// let record = project_history(&event, &employee);
/// assert_eq!(record.employee_name, "Rafael Lima");
/// assert_eq!(record.punch_type, "exit");
/// assert_eq!(record.date, "10/03/2025");
/// assert_eq!(record.time, "17:05");
/// ```
pub fn project_history(event: &PunchEvent, employee: &Employee) -> PunchHistoryRecord {
    PunchHistoryRecord {
        id: event.id,
        employee_id: event.employee_id,
        employee_name: employee.display_name().to_string(),
        punch_type: event.punch_type.as_str().to_string(),
        timestamp: event.timestamp,
        date: event.timestamp.format("%d/%m/%Y").to_string(),
        time: event.timestamp.format("%H:%M").to_string(),
    }
}
