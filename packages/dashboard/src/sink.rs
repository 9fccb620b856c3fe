//! Publication of recomputed views.

use std::sync::{Arc, Mutex};

use mortality_dash_analytics_models::{DashboardViews, FilterState, ViewKind};
use serde::Serialize;

/// One publication: the state that produced it, which views changed, and
/// the full set of current views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUpdate {
    /// Filter state the views were computed for.
    pub filter: FilterState,
    /// Views recomputed by this update.
    pub changed: Vec<ViewKind>,
    /// Snapshot of every view.
    pub views: DashboardViews,
}

/// Receives every published [`ViewUpdate`].
pub trait ViewSink: Send {
    /// Called after each recomputation.
    fn publish(&mut self, update: &ViewUpdate);
}

/// Keeps every update it receives.
///
/// Clones share the same buffer, so one clone can be handed to the
/// controller and another kept for reading.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    updates: Arc<Mutex<Vec<ViewUpdate>>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far.
    #[must_use]
    pub fn updates(&self) -> Vec<ViewUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }
}

impl ViewSink for RecordingSink {
    fn publish(&mut self, update: &ViewUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update.clone());
        }
    }
}
