//! Progress reporting for dataset loading.
//!
//! [`ProgressCallback`] keeps the loader independent of how progress is
//! shown. The CLI plugs in `indicatif` bars; tests and library callers use
//! [`null_progress`].

use std::sync::Arc;

/// Receives progress updates while the input tables are loaded.
///
/// Implementations must be `Send + Sync` because each table is parsed on
/// the blocking pool and reports from there.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of steps.
    fn set_total(&self, total: u64);

    /// Advance by `delta` steps.
    fn inc(&self, delta: u64);

    /// Update the message shown next to the indicator.
    fn set_message(&self, msg: String);

    /// Mark the load as complete.
    fn finish(&self, msg: String);
}

/// Ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
