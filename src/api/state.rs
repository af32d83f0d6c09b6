//! Application state for the time-clock API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::calculation::ReportEngine;
use crate::config::ConfigLoader;
use crate::render::{PdfRenderer, ReportRenderer};
use crate::store::{InMemoryPunchStore, PunchStore};

/// Shared application state.
///
/// Holds the punch store, the report engine configured for this deployment,
/// and the renderer used for downloadable reports.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PunchStore>,
    engine: ReportEngine,
    renderer: Arc<dyn ReportRenderer>,
}

impl AppState {
    /// Creates a new application state around a store and a report engine.
    pub fn new(store: Arc<dyn PunchStore>, engine: ReportEngine) -> Self {
        Self {
            store,
            engine,
            renderer: Arc::new(PdfRenderer),
        }
    }

    /// Builds an in-memory deployment from loaded configuration.
    ///
    /// Employees listed in the configuration are registered in the store.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let store = InMemoryPunchStore::with_employees(config.config().employees.iter().cloned());
        Self::new(Arc::new(store), ReportEngine::new(config.report_settings()))
    }

    /// Replaces the report renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Returns the punch store.
    pub fn store(&self) -> &dyn PunchStore {
        self.store.as_ref()
    }

    /// Returns the report engine.
    pub fn engine(&self) -> &ReportEngine {
        &self.engine
    }

    /// Returns the report renderer.
    pub fn renderer(&self) -> &dyn ReportRenderer {
        self.renderer.as_ref()
    }

    /// Offset that incoming timestamps are converted to.
    pub fn reference_offset(&self) -> FixedOffset {
        self.engine.settings().reference_offset
    }
}
