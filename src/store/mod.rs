//! Punch persistence for the time-clock engine.
//!
//! The aggregation core never touches storage; it works on event snapshots
//! handed to it. This module defines the [`PunchStore`] port the HTTP layer
//! talks to and an in-memory implementation.

mod memory;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::error::EngineResult;
use crate::models::{Employee, PunchEvent, PunchType};

pub use memory::InMemoryPunchStore;

/// Filters for a punch history listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Only punches of this employee.
    pub employee_id: Option<u64>,
    /// Only punches on or after this local date.
    pub date_from: Option<NaiveDate>,
    /// Only punches on or before this local date.
    pub date_to: Option<NaiveDate>,
    /// Only punches of this type.
    pub punch_type: Option<PunchType>,
}

impl HistoryQuery {
    /// Returns true if the event passes every filter.
    pub fn matches(&self, event: &PunchEvent) -> bool {
        let date = event.date();
        self.employee_id.is_none_or(|id| event.employee_id == id)
            && self.date_from.is_none_or(|from| date >= from)
            && self.date_to.is_none_or(|to| date <= to)
            && self.punch_type.is_none_or(|t| event.punch_type == t)
    }
}

/// Storage port for employees and their punches.
///
/// Implementations are the system of record: they assign event ids and
/// must keep events immutable once saved.
pub trait PunchStore: Send + Sync {
    /// Looks up an employee, failing with `EmployeeNotFound`.
    fn employee(&self, employee_id: u64) -> EngineResult<Employee>;

    /// Events of one employee whose local date falls in `[start, end]`,
    /// sorted by timestamp ascending.
    fn fetch_events(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<PunchEvent>>;

    /// The employee's most recent punch, if any.
    fn fetch_last_event(&self, employee_id: u64) -> EngineResult<Option<PunchEvent>>;

    /// Persists a punch with an explicit type.
    fn save_event(
        &self,
        employee_id: u64,
        punch_type: PunchType,
        timestamp: DateTime<FixedOffset>,
    ) -> EngineResult<PunchEvent>;

    /// Infers the next punch type for the employee and persists the punch.
    ///
    /// Lookup and insert happen as one step, so two concurrent punches for
    /// the same employee cannot both be recorded as entries.
    fn record_punch(
        &self,
        employee_id: u64,
        timestamp: DateTime<FixedOffset>,
    ) -> EngineResult<PunchEvent>;

    /// Punches matching the query, most recent first.
    fn query_history(&self, query: &HistoryQuery) -> EngineResult<Vec<PunchEvent>>;
}
