//! View builders and the engine that runs them for a filter state.

pub mod age;
pub mod cause;
pub mod geo;
pub mod sex;
pub mod trend;

use std::sync::Arc;

use mortality_dash_analytics_models::{DashboardViews, FilterState, ViewKind};
use mortality_dash_geography_models::countries::CountryCodeResolver;

use crate::filter::FilteredRecords;
use crate::store::RecordStore;

/// Settings shared by every view builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Cause label of aggregate rows to drop, if the data has any.
    pub all_cause_label: Option<String>,
}

/// Builds views from a shared [`RecordStore`].
///
/// Every build is a pure function of the store and the given
/// [`FilterState`].
#[derive(Debug, Clone)]
pub struct ViewEngine {
    store: Arc<RecordStore>,
    resolver: CountryCodeResolver,
    options: ViewOptions,
}

impl ViewEngine {
    /// Creates an engine over `store`.
    #[must_use]
    pub const fn new(
        store: Arc<RecordStore>,
        resolver: CountryCodeResolver,
        options: ViewOptions,
    ) -> Self {
        Self {
            store,
            resolver,
            options,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The country resolver used for the geo view.
    #[must_use]
    pub const fn resolver(&self) -> &CountryCodeResolver {
        &self.resolver
    }

    /// Builds every view.
    #[must_use]
    pub fn build_all(&self, state: &FilterState) -> DashboardViews {
        let mut views = DashboardViews::default();
        self.rebuild(state, &ViewKind::ALL, &mut views);
        views
    }

    /// Recomputes `kinds` into `views`, replacing their previous contents.
    /// Views not listed are left untouched.
    pub fn rebuild(&self, state: &FilterState, kinds: &[ViewKind], views: &mut DashboardViews) {
        let filtered = FilteredRecords::new(
            &self.store,
            &state.year_range,
            self.options.all_cause_label.as_deref(),
        );
        let country = filtered.mortality_for(&state.selected_country);

        for kind in kinds {
            log::debug!("Rebuilding {kind} view for {}", state.year_range);
            match kind {
                ViewKind::Geo => {
                    views.geo = geo::build_geo_view(self.store.regions(), &filtered, &self.resolver);
                }
                ViewKind::TimeSeries => {
                    views.time_series = trend::build_time_series(&filtered.mortality);
                }
                ViewKind::CauseSummary => {
                    views.cause_summary =
                        cause::build_cause_summary(&state.selected_country, &country);
                }
                ViewKind::CauseBubbles => {
                    let summary = cause::build_cause_summary(&state.selected_country, &country);
                    views.cause_bubbles = cause::build_cause_bubbles(&summary);
                }
                ViewKind::AgeCauseMatrix => {
                    views.age_cause_matrix = age::build_age_cause_matrix(&country);
                }
                ViewKind::SexRatio => {
                    views.sex_ratio = sex::build_sex_ratio(&country);
                }
            }
        }
    }
}
