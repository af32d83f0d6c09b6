//! Day grouping of punch streams.
//!
//! This module partitions an arbitrary sequence of punches into per-date
//! [`DayBucket`]s, each sorted chronologically.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DayBucket, PunchEvent};

/// Groups punches by the local calendar date of their timestamp.
///
/// Input order does not matter. Inside each bucket events are sorted by
/// timestamp ascending with a stable sort, so punches sharing a timestamp
/// keep their input order. The map iterates dates in ascending order.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::group_by_day;
/// use timeclock_engine::models::{PunchEvent, PunchType};
/// use chrono::{DateTime, NaiveDate};
///
/// let punch = |id, punch_type, ts| PunchEvent {
///     id,
///     employee_id: 1,
///     punch_type,
///     timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
/// };
///
/// let days = group_by_day(vec![
///     punch(3, PunchType::Entry, "2025-03-11T08:00:00-04:00"),
///     punch(2, PunchType::Exit, "2025-03-10T17:00:00-04:00"),
///     punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
/// ]);
///
/// assert_eq!(days.len(), 2);
/// let monday = &days[&NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()];
/// assert_eq!(monday.events[0].id, 1);
/// assert_eq!(monday.events[1].id, 2);
/// ```
pub fn group_by_day<I>(events: I) -> BTreeMap<NaiveDate, DayBucket>
where
    I: IntoIterator<Item = PunchEvent>,
{
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for event in events {
        let date = event.date();
        days.entry(date)
            .or_insert_with(|| DayBucket {
                date,
                events: Vec::new(),
            })
            .events
            .push(event);
    }

    for bucket in days.values_mut() {
        bucket.events.sort_by_key(|event| event.timestamp);
    }

    days
}
