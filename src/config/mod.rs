//! Configuration loading and management for the time-clock engine.
//!
//! This module loads the deployment settings (standard workday, reference
//! timezone, slot count, server address and the employee roster) from a
//! YAML file.
//!
//! # Example
//!
//! ```no_run
//! use timeclock_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/timeclock.yaml").unwrap();
//! println!("Standard workday: {} minutes", config.config().standard_workday_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, ServerConfig};
