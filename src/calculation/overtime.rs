//! Overtime and deficit against the standard workday.
//!
//! This module compares a day's worked duration with the configured standard
//! workday and produces a signed difference. Parsing failures are reported as
//! [`EngineError::InvalidDuration`] by [`try_compute_delta`]; the lenient
//! [`compute_delta`] keeps the long-standing report behaviour of showing
//! `0:00` instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineResult;

use super::daily_duration::{WorkedDuration, parse_duration};

/// Default standard workday in minutes (8 hours).
pub const DEFAULT_STANDARD_WORKDAY_MINUTES: i64 = 480;

/// Signed difference between worked time and the standard workday.
///
/// Displays as `+H:MM` for overtime, `-H:MM` for a deficit and `0:00` when
/// nothing is owed either way.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::OvertimeDelta;
///
/// assert_eq!(OvertimeDelta::Overtime(30).to_string(), "+0:30");
/// assert_eq!(OvertimeDelta::Deficit(60).to_string(), "-1:00");
/// assert_eq!(OvertimeDelta::Even.to_string(), "0:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "minutes", rename_all = "snake_case")]
pub enum OvertimeDelta {
    /// Minutes worked beyond the standard workday.
    Overtime(i64),
    /// Minutes missing to reach the standard workday.
    Deficit(i64),
    /// Exactly on target, or no worked time at all.
    Even,
}

impl OvertimeDelta {
    /// Signed minutes: positive for overtime, negative for a deficit.
    pub fn signed_minutes(self) -> i64 {
        match self {
            OvertimeDelta::Overtime(minutes) => minutes,
            OvertimeDelta::Deficit(minutes) => -minutes,
            OvertimeDelta::Even => 0,
        }
    }
}

impl fmt::Display for OvertimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OvertimeDelta::Overtime(minutes) => {
                write!(f, "+{}", WorkedDuration::from_minutes(minutes))
            }
            OvertimeDelta::Deficit(minutes) => {
                write!(f, "-{}", WorkedDuration::from_minutes(minutes))
            }
            OvertimeDelta::Even => f.write_str("0:00"),
        }
    }
}

/// Compares a worked duration with the standard workday.
///
/// A zero duration is [`OvertimeDelta::Even`], not a full-day deficit: a day
/// with no paired punches is reported as `0:00`.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::{delta_for, OvertimeDelta, WorkedDuration};
///
/// let worked = WorkedDuration::from_minutes(420);
/// assert_eq!(delta_for(worked, 480), OvertimeDelta::Deficit(60));
/// assert_eq!(delta_for(WorkedDuration::ZERO, 480), OvertimeDelta::Even);
/// ```
pub fn delta_for(worked: WorkedDuration, standard_workday_minutes: i64) -> OvertimeDelta {
    if worked.is_zero() {
        return OvertimeDelta::Even;
    }

    let worked = worked.minutes();
    if worked > standard_workday_minutes {
        OvertimeDelta::Overtime(worked - standard_workday_minutes)
    } else if worked < standard_workday_minutes {
        OvertimeDelta::Deficit(standard_workday_minutes - worked)
    } else {
        OvertimeDelta::Even
    }
}

/// Parses an `H:MM` total and compares it with the standard workday.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidDuration`] when the total is not `H:MM`.
pub fn try_compute_delta(
    total_duration: &str,
    standard_workday_minutes: i64,
) -> EngineResult<OvertimeDelta> {
    let worked = parse_duration(total_duration)?;
    Ok(delta_for(worked, standard_workday_minutes))
}

/// Formats the signed difference for an `H:MM` total, showing `0:00` when the
/// total cannot be parsed.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::compute_delta;
///
/// assert_eq!(compute_delta("8:30", 480), "+0:30");
/// assert_eq!(compute_delta("7:00", 480), "-1:00");
/// assert_eq!(compute_delta("8:00", 480), "0:00");
/// assert_eq!(compute_delta("garbage", 480), "0:00");
/// ```
pub fn compute_delta(total_duration: &str, standard_workday_minutes: i64) -> String {
    match try_compute_delta(total_duration, standard_workday_minutes) {
        Ok(delta) => delta.to_string(),
        Err(err) => {
            warn!(error = %err, "Unparseable worked duration, reporting 0:00");
            OvertimeDelta::Even.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    const STANDARD: i64 = DEFAULT_STANDARD_WORKDAY_MINUTES;

    #[test]
    fn test_half_hour_overtime() {
        assert_eq!(compute_delta("8:30", STANDARD), "+0:30");
    }

    #[test]
    fn test_one_hour_deficit() {
        assert_eq!(compute_delta("7:00", STANDARD), "-1:00");
    }

    #[test]
    fn test_exactly_standard_is_even() {
        assert_eq!(compute_delta("8:00", STANDARD), "0:00");
        assert_eq!(try_compute_delta("8:00", STANDARD).unwrap(), OvertimeDelta::Even);
    }

    #[test]
    fn test_zero_total_is_not_a_full_day_deficit() {
        assert_eq!(compute_delta("0:00", STANDARD), "0:00");
    }

    #[test]
    fn test_small_deficit_keeps_minutes() {
        assert_eq!(compute_delta("7:45", STANDARD), "-0:15");
        assert_eq!(compute_delta("0:01", STANDARD), "-7:59");
    }

    #[test]
    fn test_long_overtime_has_unbounded_hours() {
        assert_eq!(compute_delta("20:05", STANDARD), "+12:05");
    }

    #[test]
    fn test_malformed_total_shows_zero_but_try_reports_error() {
        assert_eq!(compute_delta("eight", STANDARD), "0:00");
        match try_compute_delta("eight", STANDARD) {
            Err(EngineError::InvalidDuration { input }) => assert_eq!(input, "eight"),
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_standard_workday() {
        // Six-hour standard
        assert_eq!(compute_delta("7:00", 360), "+1:00");
        assert_eq!(compute_delta("5:30", 360), "-0:30");
    }

    #[test]
    fn test_signed_minutes() {
        assert_eq!(OvertimeDelta::Overtime(15).signed_minutes(), 15);
        assert_eq!(OvertimeDelta::Deficit(15).signed_minutes(), -15);
        assert_eq!(OvertimeDelta::Even.signed_minutes(), 0);
    }

    #[test]
    fn test_serialize_delta() {
        let json = serde_json::to_string(&OvertimeDelta::Overtime(30)).unwrap();
        assert_eq!(json, r#"{"kind":"overtime","minutes":30}"#);
    }
}
