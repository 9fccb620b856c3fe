//! The recomputation state machine.
//!
//! The controller starts `Uninitialized`. [`RecomputationController::load`]
//! awaits the one-shot dataset load, builds the record store, computes every
//! view and moves to `Ready`. From then on each [`FilterEvent`] updates the
//! [`FilterState`] and rebuilds exactly the views that depend on what
//! changed. Events dispatched before the load completes are queued and
//! replayed in order once it does.

use std::collections::VecDeque;
use std::sync::Arc;

use mortality_dash_analytics::{RecordStore, ViewEngine, ViewOptions};
use mortality_dash_analytics_models::{DashboardViews, FilterState, ViewKind, YearRange};
use mortality_dash_geography_models::countries::CountryCodeResolver;

use crate::DashboardError;
use crate::loader::DatasetLoader;
use crate::sink::{ViewSink, ViewUpdate};

/// A change to the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The year slider moved.
    YearRangeChanged {
        /// First year, inclusive.
        from: i32,
        /// Last year, inclusive.
        to: i32,
    },
    /// A country was picked.
    CountrySelected(String),
}

impl FilterEvent {
    /// Views that must be rebuilt when this event is applied.
    #[must_use]
    pub const fn affected_views(&self) -> &'static [ViewKind] {
        match self {
            Self::YearRangeChanged { .. } => &ViewKind::ALL,
            Self::CountrySelected(_) => &ViewKind::COUNTRY_SCOPED,
        }
    }
}

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No data yet; events are queued.
    Uninitialized,
    /// Data loaded; events are applied immediately.
    Ready,
}

struct Ready {
    engine: ViewEngine,
    filter: FilterState,
    views: DashboardViews,
}

/// Owns the filter state and keeps every view consistent with it.
pub struct RecomputationController {
    resolver: CountryCodeResolver,
    options: ViewOptions,
    default_country: Option<String>,
    sinks: Vec<Box<dyn ViewSink>>,
    pending: VecDeque<FilterEvent>,
    ready: Option<Ready>,
}

impl RecomputationController {
    /// Creates an uninitialized controller.
    #[must_use]
    pub fn new(
        resolver: CountryCodeResolver,
        options: ViewOptions,
        default_country: Option<String>,
    ) -> Self {
        Self {
            resolver,
            options,
            default_country,
            sinks: Vec::new(),
            pending: VecDeque::new(),
            ready: None,
        }
    }

    /// Registers a sink for every subsequent publication.
    pub fn add_sink(&mut self, sink: Box<dyn ViewSink>) {
        self.sinks.push(sink);
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        if self.ready.is_some() {
            ControllerState::Ready
        } else {
            ControllerState::Uninitialized
        }
    }

    /// Current filter state, once loaded.
    #[must_use]
    pub fn filter_state(&self) -> Option<&FilterState> {
        self.ready.as_ref().map(|r| &r.filter)
    }

    /// Most recently published views, once loaded.
    #[must_use]
    pub fn views(&self) -> Option<&DashboardViews> {
        self.ready.as_ref().map(|r| &r.views)
    }

    /// The loaded record store, once loaded.
    #[must_use]
    pub fn store(&self) -> Option<&RecordStore> {
        self.ready.as_ref().map(|r| r.engine.store())
    }

    /// Number of events waiting for the load to finish.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Loads the datasets and transitions to `Ready`.
    ///
    /// Publishes the initial views, then replays queued events. On failure
    /// the controller stays `Uninitialized` with its queue intact.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::AlreadyLoaded`] if called twice
    /// * [`DashboardError::Load`] if the loader fails
    pub async fn load<L: DatasetLoader>(&mut self, loader: &L) -> Result<(), DashboardError> {
        if self.ready.is_some() {
            return Err(DashboardError::AlreadyLoaded);
        }

        let datasets = loader.load().await?;
        if datasets.skipped_rows > 0 {
            log::warn!("{} rows were skipped while loading", datasets.skipped_rows);
        }

        let store = Arc::new(RecordStore::new(
            datasets.population,
            datasets.mortality,
            datasets.regions,
        ));
        let filter = self.initial_filter(&store);
        let engine = ViewEngine::new(store, self.resolver.clone(), self.options.clone());

        log::info!(
            "Dashboard ready: years {}, country {:?}",
            filter.year_range,
            filter.selected_country
        );

        let views = engine.build_all(&filter);
        self.ready = Some(Ready {
            engine,
            filter,
            views,
        });
        self.publish(ViewKind::ALL.to_vec());

        while let Some(event) = self.pending.pop_front() {
            if let Err(e) = self.apply(&event) {
                log::warn!("Dropping queued event {event:?}: {e}");
            }
        }

        Ok(())
    }

    /// Applies `event`, or queues it if the data is not loaded yet.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidYearRange`] if a year range has
    /// `from > to`. The state is left unchanged.
    pub fn dispatch(&mut self, event: FilterEvent) -> Result<(), DashboardError> {
        if self.ready.is_none() {
            if let FilterEvent::YearRangeChanged { from, to } = event {
                YearRange::new(from, to)?;
            }
            log::debug!("Queueing {event:?} until the data is loaded");
            self.pending.push_back(event);
            return Ok(());
        }

        self.apply(&event)
    }

    fn apply(&mut self, event: &FilterEvent) -> Result<(), DashboardError> {
        let Some(ready) = self.ready.as_mut() else {
            return Ok(());
        };

        match event {
            FilterEvent::YearRangeChanged { from, to } => {
                ready.filter.year_range = YearRange::new(*from, *to)?;
            }
            FilterEvent::CountrySelected(country) => {
                if !ready.engine.store().has_country(country) {
                    log::warn!("No mortality records for {country:?}");
                }
                ready.filter.selected_country.clone_from(country);
            }
        }

        let kinds = event.affected_views();
        ready.engine.rebuild(&ready.filter, kinds, &mut ready.views);
        self.publish(kinds.to_vec());

        Ok(())
    }

    fn initial_filter(&self, store: &RecordStore) -> FilterState {
        let year_range = store.year_bounds().unwrap_or_else(|| {
            log::warn!("Mortality table is empty");
            YearRange::single(0)
        });

        let selected_country = self
            .default_country
            .as_deref()
            .filter(|country| store.has_country(country))
            .or_else(|| store.countries().first().copied())
            .unwrap_or_default()
            .to_owned();

        FilterState {
            year_range,
            selected_country,
        }
    }

    fn publish(&mut self, changed: Vec<ViewKind>) {
        let Some(ready) = &self.ready else {
            return;
        };

        let update = ViewUpdate {
            filter: ready.filter.clone(),
            changed,
            views: ready.views.clone(),
        };
        for sink in &mut self.sinks {
            sink.publish(&update);
        }
    }
}

#[cfg(test)]
mod tests {
    use mortality_dash_geography_models::{BoundaryRegion, RegionCode};
    use mortality_dash_ingest::{IngestError, LoadedDatasets};
    use mortality_dash_mortality_models::{
        FineAgeBand, FineAgeDeaths, MortalityRecord, PopulationRecord, Sex,
    };

    use super::*;
    use crate::sink::RecordingSink;

    struct FakeLoader(Option<LoadedDatasets>);

    impl DatasetLoader for FakeLoader {
        async fn load(&self) -> Result<LoadedDatasets, IngestError> {
            self.0.clone().ok_or(IngestError::MissingColumn {
                table: "mortality",
                column: "Year".to_string(),
            })
        }
    }

    fn mortality(country: &str, year: i32, cause: &str, sex: Sex, deaths: f64) -> MortalityRecord {
        let mut deaths_by_age = FineAgeDeaths::default();
        deaths_by_age.set(FineAgeBand::Age60To64, deaths);
        MortalityRecord {
            country: country.to_string(),
            year,
            cause: cause.to_string(),
            sex,
            deaths_all_ages: deaths,
            deaths_by_age,
        }
    }

    fn datasets() -> LoadedDatasets {
        LoadedDatasets {
            population: vec![
                PopulationRecord {
                    country: "Malaysia".to_string(),
                    year: 2010,
                    population: 30_000.0,
                },
                PopulationRecord {
                    country: "Singapore".to_string(),
                    year: 2015,
                    population: 5_000_000.0,
                },
            ],
            mortality: vec![
                mortality("Malaysia", 2010, "Heart disease", Sex::Male, 100.0),
                mortality("Malaysia", 2010, "Heart disease", Sex::Female, 50.0),
                mortality("Malaysia", 2012, "Stroke", Sex::Male, 20.0),
                mortality("Brunei Darussalam", 2011, "Stroke", Sex::Female, 3.0),
            ],
            regions: vec![
                BoundaryRegion {
                    code: RegionCode::new("MYS"),
                    name: Some("Malaysia".to_string()),
                },
                BoundaryRegion {
                    code: RegionCode::new("SGP"),
                    name: Some("Singapore".to_string()),
                },
            ],
            skipped_rows: 0,
        }
    }

    fn controller(default_country: Option<&str>) -> (RecomputationController, RecordingSink) {
        let mut controller = RecomputationController::new(
            CountryCodeResolver::default(),
            ViewOptions {
                all_cause_label: Some("All causes".to_string()),
            },
            default_country.map(str::to_owned),
        );
        let sink = RecordingSink::new();
        controller.add_sink(Box::new(sink.clone()));
        (controller, sink)
    }

    #[tokio::test]
    async fn load_sets_initial_state_and_publishes() {
        let (mut controller, sink) = controller(Some("Malaysia"));
        assert_eq!(controller.state(), ControllerState::Uninitialized);

        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();

        assert_eq!(controller.state(), ControllerState::Ready);
        let filter = controller.filter_state().unwrap();
        assert_eq!(filter.year_range, YearRange::new(2010, 2012).unwrap());
        assert_eq!(filter.selected_country, "Malaysia");

        let updates = sink.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].changed, ViewKind::ALL);
    }

    #[tokio::test]
    async fn missing_default_country_falls_back_to_first() {
        let (mut controller, _) = controller(Some("Atlantis"));
        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();
        assert_eq!(
            controller.filter_state().unwrap().selected_country,
            "Brunei Darussalam"
        );
    }

    #[tokio::test]
    async fn year_change_rebuilds_every_view() {
        let (mut controller, sink) = controller(Some("Malaysia"));
        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();

        controller
            .dispatch(FilterEvent::YearRangeChanged {
                from: 2010,
                to: 2010,
            })
            .unwrap();

        let views = controller.views().unwrap();
        let sex = views.sex_ratio;
        assert!((sex.male_percent - 66.666_666).abs() < 1e-4);
        assert!((sex.female_percent - 33.333_333).abs() < 1e-4);
        assert_eq!(views.cause_summary.causes.len(), 1);
        assert!((views.cause_summary.causes[0].count - 150.0).abs() < f64::EPSILON);

        let update = sink.updates().pop().unwrap();
        assert_eq!(update.changed, ViewKind::ALL);
    }

    #[tokio::test]
    async fn country_change_leaves_year_scoped_views() {
        let (mut controller, sink) = controller(Some("Malaysia"));
        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();
        let before = controller.views().unwrap().clone();

        controller
            .dispatch(FilterEvent::CountrySelected("Brunei Darussalam".to_string()))
            .unwrap();

        let after = controller.views().unwrap();
        assert_eq!(after.geo, before.geo);
        assert_eq!(after.time_series, before.time_series);
        assert_eq!(after.cause_summary.country, "Brunei Darussalam");
        assert!((after.sex_ratio.female_percent - 100.0).abs() < f64::EPSILON);

        let update = sink.updates().pop().unwrap();
        assert_eq!(update.changed, ViewKind::COUNTRY_SCOPED);
    }

    #[tokio::test]
    async fn singapore_has_population_but_no_deaths() {
        let (mut controller, _) = controller(Some("Malaysia"));
        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();
        controller
            .dispatch(FilterEvent::YearRangeChanged {
                from: 2015,
                to: 2015,
            })
            .unwrap();

        let views = controller.views().unwrap();
        let singapore = views.geo.get(&RegionCode::new("SGP")).unwrap();
        assert!((singapore.population - 5_000_000.0).abs() < f64::EPSILON);
        assert!(singapore.deaths.abs() < f64::EPSILON);
        assert!(singapore.rate.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected_without_change() {
        let (mut controller, sink) = controller(Some("Malaysia"));
        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();
        let before = controller.filter_state().unwrap().clone();

        let err = controller
            .dispatch(FilterEvent::YearRangeChanged {
                from: 2012,
                to: 2010,
            })
            .unwrap_err();

        assert!(matches!(err, DashboardError::InvalidYearRange(_)));
        assert_eq!(controller.filter_state().unwrap(), &before);
        assert_eq!(sink.updates().len(), 1);
    }

    #[tokio::test]
    async fn events_before_load_are_replayed_in_order() {
        let (mut controller, sink) = controller(Some("Malaysia"));

        controller
            .dispatch(FilterEvent::CountrySelected("Brunei Darussalam".to_string()))
            .unwrap();
        controller
            .dispatch(FilterEvent::YearRangeChanged {
                from: 2011,
                to: 2011,
            })
            .unwrap();
        assert_eq!(controller.pending_events(), 2);
        assert!(sink.updates().is_empty());

        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();

        assert_eq!(controller.pending_events(), 0);
        let filter = controller.filter_state().unwrap();
        assert_eq!(filter.selected_country, "Brunei Darussalam");
        assert_eq!(filter.year_range, YearRange::single(2011));

        let changed: Vec<Vec<ViewKind>> =
            sink.updates().into_iter().map(|u| u.changed).collect();
        assert_eq!(
            changed,
            [
                ViewKind::ALL.to_vec(),
                ViewKind::COUNTRY_SCOPED.to_vec(),
                ViewKind::ALL.to_vec()
            ]
        );
    }

    #[tokio::test]
    async fn failed_load_stays_uninitialized() {
        let (mut controller, sink) = controller(None);
        controller
            .dispatch(FilterEvent::CountrySelected("Malaysia".to_string()))
            .unwrap();

        let err = controller.load(&FakeLoader(None)).await.unwrap_err();

        assert!(matches!(err, DashboardError::Load(_)));
        assert_eq!(controller.state(), ControllerState::Uninitialized);
        assert_eq!(controller.pending_events(), 1);
        assert!(controller.views().is_none());
        assert!(sink.updates().is_empty());
    }

    #[tokio::test]
    async fn second_load_is_rejected() {
        let (mut controller, _) = controller(None);
        controller.load(&FakeLoader(Some(datasets()))).await.unwrap();

        let err = controller.load(&FakeLoader(Some(datasets()))).await.unwrap_err();
        assert!(matches!(err, DashboardError::AlreadyLoaded));
    }

    #[test]
    fn dependency_sets() {
        assert_eq!(
            FilterEvent::YearRangeChanged { from: 1, to: 2 }.affected_views(),
            ViewKind::ALL
        );
        assert_eq!(
            FilterEvent::CountrySelected(String::new()).affected_views(),
            ViewKind::COUNTRY_SCOPED
        );
    }

    #[test]
    fn inverted_range_is_rejected_before_load() {
        let (mut controller, _) = controller(None);
        let err = controller
            .dispatch(FilterEvent::YearRangeChanged { from: 3, to: 1 })
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidYearRange(_)));
        assert_eq!(controller.pending_events(), 0);
    }
}
