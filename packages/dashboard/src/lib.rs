#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter-state controller for the mortality dashboard.
//!
//! Wires the dataset loader, the view engine and the registered
//! [`ViewSink`]s together through [`RecomputationController`].

pub mod config;
pub mod controller;
pub mod loader;
pub mod sink;

use mortality_dash_analytics_models::AnalyticsError;
use mortality_dash_ingest::IngestError;
use thiserror::Error;

pub use config::{ConfigError, EngineConfig};
pub use controller::{ControllerState, FilterEvent, RecomputationController};
pub use loader::{DatasetLoader, FileLoader};
pub use sink::{RecordingSink, ViewSink, ViewUpdate};

/// Errors raised by the controller.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The initial load failed.
    #[error("Failed to load datasets: {0}")]
    Load(#[from] IngestError),

    /// `load` was called on a controller that is already loaded.
    #[error("Datasets are already loaded")]
    AlreadyLoaded,

    /// A year range event had `from > to`.
    #[error(transparent)]
    InvalidYearRange(#[from] AnalyticsError),
}

impl RecomputationController {
    /// Creates a controller configured from `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.resolver(),
            config.view_options(),
            config.views.default_country.clone(),
        )
    }
}
