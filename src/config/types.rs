//! Configuration types for the time-clock engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::Deserialize;

use crate::calculation::{DEFAULT_MAX_SLOTS, DEFAULT_STANDARD_WORKDAY_MINUTES};
use crate::models::Employee;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API listens on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// The complete engine configuration.
///
/// Every field has a default, so an empty file yields a working setup for
/// an 8-hour workday in UTC-4.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of the standard workday in minutes.
    pub standard_workday_minutes: i64,
    /// Offset of the reference timezone from UTC, in minutes (east positive).
    pub utc_offset_minutes: i32,
    /// Number of entry/exit slots shown per report row.
    pub max_slots: usize,
    /// Default log filter directive.
    pub log_level: String,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Employees registered with the clock at startup.
    pub employees: Vec<Employee>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standard_workday_minutes: DEFAULT_STANDARD_WORKDAY_MINUTES,
            utc_offset_minutes: -240,
            max_slots: DEFAULT_MAX_SLOTS,
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            employees: Vec::new(),
        }
    }
}
