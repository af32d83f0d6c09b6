//! Core data models for the time-clock engine.
//!
//! This module contains the domain models used throughout the engine.

mod employee;
mod history;
mod punch;
mod report;

pub use employee::Employee;
pub use history::{PunchHistoryRecord, project_history};
pub use punch::{PunchEvent, PunchType};
pub use report::{DayBucket, DayReportRow, PeriodReport, SlotPair};
