//! In-memory punch store.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use parking_lot::RwLock;
use tracing::debug;

use crate::calculation::infer_next_type;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PunchEvent, PunchType};

use super::{HistoryQuery, PunchStore};

#[derive(Debug, Default)]
struct Inner {
    employees: HashMap<u64, Employee>,
    events: Vec<PunchEvent>,
    next_id: u64,
}

impl Inner {
    fn require_employee(&self, employee_id: u64) -> EngineResult<&Employee> {
        self.employees
            .get(&employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })
    }

    /// Latest punch by timestamp; on a tie the one inserted last wins.
    fn last_event(&self, employee_id: u64) -> Option<&PunchEvent> {
        self.events
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .max_by_key(|e| (e.timestamp, e.id))
    }

    fn insert(
        &mut self,
        employee_id: u64,
        punch_type: PunchType,
        timestamp: DateTime<FixedOffset>,
    ) -> PunchEvent {
        self.next_id += 1;
        let event = PunchEvent {
            id: self.next_id,
            employee_id,
            punch_type,
            timestamp,
        };
        self.events.push(event.clone());
        event
    }
}

/// A [`PunchStore`] kept entirely in memory behind a single lock.
///
/// Event ids are assigned sequentially starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryPunchStore {
    inner: RwLock<Inner>,
}

impl InMemoryPunchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given employees registered.
    pub fn with_employees<I>(employees: I) -> Self
    where
        I: IntoIterator<Item = Employee>,
    {
        let store = Self::new();
        for employee in employees {
            store.add_employee(employee);
        }
        store
    }

    /// Registers or replaces an employee.
    pub fn add_employee(&self, employee: Employee) {
        self.inner.write().employees.insert(employee.id, employee);
    }

    /// Total number of stored punches.
    pub fn len(&self) -> usize {
        self.inner.read().events.len()
    }

    /// Returns true if no punches are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().events.is_empty()
    }
}

impl PunchStore for InMemoryPunchStore {
    fn employee(&self, employee_id: u64) -> EngineResult<Employee> {
        self.inner.read().require_employee(employee_id).cloned()
    }

    fn fetch_events(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<PunchEvent>> {
        let inner = self.inner.read();
        inner.require_employee(employee_id)?;

        let mut events: Vec<PunchEvent> = inner
            .events
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .filter(|e| {
                let date = e.date();
                date >= start && date <= end
            })
            .cloned()
            .collect();
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }

    fn fetch_last_event(&self, employee_id: u64) -> EngineResult<Option<PunchEvent>> {
        let inner = self.inner.read();
        inner.require_employee(employee_id)?;
        Ok(inner.last_event(employee_id).cloned())
    }

    fn save_event(
        &self,
        employee_id: u64,
        punch_type: PunchType,
        timestamp: DateTime<FixedOffset>,
    ) -> EngineResult<PunchEvent> {
        let mut inner = self.inner.write();
        inner.require_employee(employee_id)?;
        Ok(inner.insert(employee_id, punch_type, timestamp))
    }

    fn record_punch(
        &self,
        employee_id: u64,
        timestamp: DateTime<FixedOffset>,
    ) -> EngineResult<PunchEvent> {
        let mut inner = self.inner.write();
        inner.require_employee(employee_id)?;

        let punch_type = infer_next_type(inner.last_event(employee_id));
        let event = inner.insert(employee_id, punch_type, timestamp);
        debug!(
            employee_id,
            punch_id = event.id,
            punch_type = %event.punch_type,
            "Punch recorded"
        );
        Ok(event)
    }

    fn query_history(&self, query: &HistoryQuery) -> EngineResult<Vec<PunchEvent>> {
        let inner = self.inner.read();
        let mut events: Vec<PunchEvent> = inner
            .events
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        events.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(events)
    }
}
