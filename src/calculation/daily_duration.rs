//! Entry/exit pairing and worked-duration calculation.
//!
//! Two independent derivations run over the same chronologically sorted
//! [`DayBucket`]:
//!
//! - a greedy left-to-right scan pairs each entry immediately followed by an
//!   exit and sums the gaps into the day's worked time;
//! - slot filling puts the first N entries and the first N exits into the
//!   display slots, regardless of how they were paired.
//!
//! On a clean alternating day both agree. On an anomalous day (say two
//! entries in a row) the skipped punch still shows up in a slot but does not
//! count towards the total.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayBucket, PunchEvent, PunchType, SlotPair};

/// Default number of entry/exit display slots per day.
pub const DEFAULT_MAX_SLOTS: usize = 4;

/// A non-negative amount of worked time with minute precision.
///
/// Displays as `H:MM`: hours are unbounded and minutes are zero-padded.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::WorkedDuration;
///
/// let duration = WorkedDuration::from_minutes(605);
/// assert_eq!(duration.to_string(), "10:05");
/// assert_eq!("10:05".parse::<WorkedDuration>().unwrap(), duration);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkedDuration {
    minutes: i64,
}

impl WorkedDuration {
    /// The zero duration, displayed as `0:00`.
    pub const ZERO: WorkedDuration = WorkedDuration { minutes: 0 };

    /// Creates a duration from whole minutes; negative input clamps to zero.
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes: minutes.max(0),
        }
    }

    /// Truncates a chrono duration to whole minutes.
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_minutes(duration.num_minutes())
    }

    /// Total minutes.
    pub fn minutes(self) -> i64 {
        self.minutes
    }

    /// Whole-hour component.
    pub fn hours_part(self) -> i64 {
        self.minutes / 60
    }

    /// Minute component, always below 60.
    pub fn minutes_part(self) -> i64 {
        self.minutes % 60
    }

    /// Returns true for `0:00`.
    pub fn is_zero(self) -> bool {
        self.minutes == 0
    }
}

impl fmt::Display for WorkedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hours_part(), self.minutes_part())
    }
}

impl FromStr for WorkedDuration {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}

/// Parses an `H:MM` string.
///
/// Hours are any non-negative integer; minutes must be below 60. Anything
/// else is [`EngineError::InvalidDuration`].
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::parse_duration;
///
/// assert_eq!(parse_duration("8:30").unwrap().minutes(), 510);
/// assert!(parse_duration("8h30").is_err());
/// assert!(parse_duration("8:75").is_err());
/// ```
pub fn parse_duration(input: &str) -> EngineResult<WorkedDuration> {
    let invalid = || EngineError::InvalidDuration {
        input: input.to_string(),
    };

    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    Ok(WorkedDuration::from_minutes(
        i64::from(hours) * 60 + i64::from(minutes),
    ))
}

/// The outcome of the pairing scan and slot filling for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDuration {
    /// Sum of all matched entry/exit gaps.
    pub duration: WorkedDuration,
    /// Display slots, exactly `max_slots` long.
    pub slots: Vec<SlotPair>,
    /// Index pairs `(entry, exit)` into the bucket that were counted.
    pub pairs: Vec<(usize, usize)>,
    /// Punches the scan stepped over without pairing.
    pub unpaired_events: usize,
}

/// Pairs entries with exits and computes a day's worked duration.
///
/// The scan keeps a cursor `i`. When `events[i]` is an entry and
/// `events[i + 1]` an exit, their gap is added and the cursor moves by two;
/// otherwise the punch at `i` is skipped and the cursor moves by one. There
/// is no backtracking, so the result is the left-to-right greedy pairing.
/// Fewer than two events always yield `0:00`.
///
/// Slots are filled separately: the first `max_slots` entries and the first
/// `max_slots` exits, in chronological order.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::compute_daily_duration;
/// use timeclock_engine::models::{DayBucket, PunchEvent, PunchType};
/// use chrono::{DateTime, NaiveDate};
///
/// let punch = |id, punch_type, ts| PunchEvent {
///     id,
///     employee_id: 1,
///     punch_type,
///     timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
/// };
/// let bucket = DayBucket {
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     events: vec![
///         punch(1, PunchType::Entry, "2025-03-10T08:00:00-04:00"),
///         punch(2, PunchType::Exit, "2025-03-10T12:00:00-04:00"),
///         punch(3, PunchType::Entry, "2025-03-10T13:00:00-04:00"),
///         punch(4, PunchType::Exit, "2025-03-10T17:00:00-04:00"),
///     ],
/// };
///
/// let result = compute_daily_duration(&bucket, 4);
/// assert_eq!(result.duration.to_string(), "8:00");
/// assert_eq!(result.pairs, vec![(0, 1), (2, 3)]);
/// ```
pub fn compute_daily_duration(bucket: &DayBucket, max_slots: usize) -> DailyDuration {
    let (duration, pairs) = pair_events(&bucket.events);
    let paired = pairs.len() * 2;

    DailyDuration {
        duration,
        slots: fill_slots(&bucket.events, max_slots),
        pairs,
        unpaired_events: bucket.events.len() - paired,
    }
}

fn pair_events(events: &[PunchEvent]) -> (WorkedDuration, Vec<(usize, usize)>) {
    let mut pairs = Vec::new();
    if events.len() < 2 {
        return (WorkedDuration::ZERO, pairs);
    }

    let mut total = Duration::zero();
    let mut i = 0;
    while i < events.len() - 1 {
        let (current, next) = (&events[i], &events[i + 1]);
        if current.punch_type == PunchType::Entry && next.punch_type == PunchType::Exit {
            total = total + (next.timestamp - current.timestamp);
            pairs.push((i, i + 1));
            i += 2;
        } else {
            i += 1;
        }
    }

    (WorkedDuration::from_duration(total), pairs)
}

fn fill_slots(events: &[PunchEvent], max_slots: usize) -> Vec<SlotPair> {
    let mut slots = vec![SlotPair::default(); max_slots];
    let entries = events.iter().filter(|e| e.punch_type == PunchType::Entry);
    let exits = events.iter().filter(|e| e.punch_type == PunchType::Exit);

    for (slot, entry) in slots.iter_mut().zip(entries) {
        slot.entry = Some(entry.time_of_day());
    }
    for (slot, exit) in slots.iter_mut().zip(exits) {
        slot.exit = Some(exit.time_of_day());
    }

    slots
}
