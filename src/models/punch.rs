//! Punch event model and related types.
//!
//! This module defines the [`PunchType`] enum and the immutable [`PunchEvent`]
//! record produced every time an employee punches the clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The two kinds of punch an employee can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchType {
    /// Clocking in.
    Entry,
    /// Clocking out.
    Exit,
}

impl PunchType {
    /// Returns the other punch type.
    ///
    /// # Example
    ///
    /// ```
    /// use timeclock_engine::models::PunchType;
    ///
    /// assert_eq!(PunchType::Entry.opposite(), PunchType::Exit);
    /// assert_eq!(PunchType::Exit.opposite(), PunchType::Entry);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            PunchType::Entry => PunchType::Exit,
            PunchType::Exit => PunchType::Entry,
        }
    }

    /// Human-readable label used in API payloads and rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            PunchType::Entry => "Entry",
            PunchType::Exit => "Exit",
        }
    }

    /// Lowercase wire name (`"entry"` / `"exit"`).
    pub fn as_str(self) -> &'static str {
        match self {
            PunchType::Entry => "entry",
            PunchType::Exit => "exit",
        }
    }
}

impl fmt::Display for PunchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PunchType {
    type Err = EngineError;

    /// Parses `entry` or `exit`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Ok(PunchType::Entry),
            "exit" => Ok(PunchType::Exit),
            _ => Err(EngineError::InvalidPunchType {
                value: s.to_string(),
            }),
        }
    }
}

/// A single timestamped punch for one employee.
///
/// Events are immutable once created. The timestamp is already resolved to
/// the deployment's reference offset, so its date component is the local
/// calendar day the punch belongs to.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::{PunchEvent, PunchType};
/// use chrono::{DateTime, NaiveDate};
///
/// let event = PunchEvent {
///     id: 1,
///     employee_id: 7,
///     punch_type: PunchType::Entry,
///     timestamp: DateTime::parse_from_rfc3339("2025-03-10T08:00:00-04:00").unwrap(),
/// };
/// assert_eq!(event.date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Identifier assigned by the store.
    pub id: u64,
    /// The employee who punched.
    pub employee_id: u64,
    /// Whether this punch is an entry or an exit.
    pub punch_type: PunchType,
    /// When the punch happened, in the reference offset.
    pub timestamp: DateTime<FixedOffset>,
}

impl PunchEvent {
    /// The local calendar date of the punch.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// The local time of day of the punch.
    pub fn time_of_day(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Returns true if this is an entry punch.
    pub fn is_entry(&self) -> bool {
        self.punch_type == PunchType::Entry
    }
}
