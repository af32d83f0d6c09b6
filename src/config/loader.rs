//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading and validating
//! the engine configuration from YAML.

use std::fs;
use std::path::Path;

use chrono::FixedOffset;

use crate::calculation::ReportSettings;
use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Loads and provides access to the engine configuration.
///
/// # File format
///
/// ```text
/// standard_workday_minutes: 480
/// utc_offset_minutes: -240
/// max_slots: 4
/// log_level: info
/// server:
///   bind_address: 127.0.0.1:8000
/// employees:
///   - id: 1
///     username: msilva
///     full_name: Maria Silva
/// ```
///
/// # Example
///
/// ```
/// use timeclock_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::from_yaml_str("standard_workday_minutes: 360").unwrap();
/// assert_eq!(loader.report_settings().standard_workday_minutes, 360);
/// assert_eq!(loader.report_settings().max_slots, 4);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    reference_offset: FixedOffset,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing ([`EngineError::ConfigNotFound`])
    /// - The file is not valid YAML for [`EngineConfig`] ([`EngineError::ConfigParseError`])
    /// - A value is out of range ([`EngineError::InvalidConfig`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Loads configuration from a file if it exists, otherwise uses defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Self::from_config(EngineConfig::default())
        }
    }

    /// Parses configuration from an in-memory YAML document.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Validates an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        if config.standard_workday_minutes <= 0 || config.standard_workday_minutes >= MINUTES_PER_DAY
        {
            return Err(EngineError::InvalidConfig {
                field: "standard_workday_minutes".to_string(),
                message: format!(
                    "must be between 1 and {}, got {}",
                    MINUTES_PER_DAY - 1,
                    config.standard_workday_minutes
                ),
            });
        }

        if config.max_slots == 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_slots".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let reference_offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| EngineError::InvalidConfig {
                field: "utc_offset_minutes".to_string(),
                message: format!("{} is not a valid UTC offset", config.utc_offset_minutes),
            })?;

        Ok(Self {
            config,
            reference_offset,
        })
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        let config = if content.trim().is_empty() {
            EngineConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?
        };

        Self::from_config(config)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The reference timezone as a fixed offset.
    pub fn reference_offset(&self) -> FixedOffset {
        self.reference_offset
    }

    /// Settings to construct a [`crate::calculation::ReportEngine`] with.
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            standard_workday_minutes: self.config.standard_workday_minutes,
            max_slots: self.config.max_slots,
            reference_offset: self.reference_offset,
        }
    }
}
