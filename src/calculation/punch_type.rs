//! Punch type inference.
//!
//! Employees never choose whether a punch is an entry or an exit: the type
//! alternates, starting with an entry.

use crate::models::{PunchEvent, PunchType};

/// Decides the type of an employee's next punch from their most recent one.
///
/// - No previous punch: [`PunchType::Entry`]
/// - Previous punch was an entry: [`PunchType::Exit`]
/// - Previous punch was an exit: [`PunchType::Entry`]
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::infer_next_type;
/// use timeclock_engine::models::{PunchEvent, PunchType};
/// use chrono::DateTime;
///
/// assert_eq!(infer_next_type(None), PunchType::Entry);
///
/// let last = PunchEvent {
///     id: 1,
///     employee_id: 1,
///     punch_type: PunchType::Entry,
///     timestamp: DateTime::parse_from_rfc3339("2025-03-10T08:00:00-04:00").unwrap(),
/// };
/// assert_eq!(infer_next_type(Some(&last)), PunchType::Exit);
/// ```
pub fn infer_next_type(last_event: Option<&PunchEvent>) -> PunchType {
    last_event
        .map(|event| event.punch_type.opposite())
        .unwrap_or(PunchType::Entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use proptest::prelude::*;

    fn event(punch_type: PunchType) -> PunchEvent {
        PunchEvent {
            id: 1,
            employee_id: 1,
            punch_type,
            timestamp: DateTime::parse_from_rfc3339("2025-03-10T08:00:00-04:00").unwrap(),
        }
    }

    #[test]
    fn test_no_history_starts_with_entry() {
        assert_eq!(infer_next_type(None), PunchType::Entry);
    }

    #[test]
    fn test_after_entry_comes_exit() {
        assert_eq!(infer_next_type(Some(&event(PunchType::Entry))), PunchType::Exit);
    }

    #[test]
    fn test_after_exit_comes_entry() {
        assert_eq!(infer_next_type(Some(&event(PunchType::Exit))), PunchType::Entry);
    }

    proptest! {
        #[test]
        fn prop_inferred_punches_alternate_from_entry(count in 1usize..200) {
            let start = DateTime::parse_from_rfc3339("2025-03-10T08:00:00-04:00").unwrap();
            let mut history: Vec<PunchEvent> = Vec::new();

            for i in 0..count {
                let punch_type = infer_next_type(history.last());
                history.push(PunchEvent {
                    id: i as u64,
                    employee_id: 1,
                    punch_type,
                    timestamp: start + Duration::minutes(i as i64 * 30),
                });
            }

            for (i, punch) in history.iter().enumerate() {
                let expected = if i % 2 == 0 { PunchType::Entry } else { PunchType::Exit };
                prop_assert_eq!(punch.punch_type, expected);
            }
        }
    }
}
