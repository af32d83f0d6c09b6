//! Employee time-clock engine.
//!
//! This crate records entry/exit punches, infers the type of each new punch
//! from the employee's history, and aggregates punches into per-day attendance
//! rows (entry/exit slots, worked hours, overtime or deficit against the
//! standard workday) for period reports served as JSON or PDF.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod render;
pub mod store;
