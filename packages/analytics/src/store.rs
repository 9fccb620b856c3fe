//! Immutable in-memory store of the loaded records.

use std::collections::BTreeSet;

use mortality_dash_analytics_models::YearRange;
use mortality_dash_geography_models::BoundaryRegion;
use mortality_dash_mortality_models::{MortalityRecord, PopulationRecord};

/// Both record sets plus the boundary regions, unfiltered.
///
/// Built once after loading and shared read-only (behind an `Arc`) by every
/// view builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    population: Vec<PopulationRecord>,
    mortality: Vec<MortalityRecord>,
    regions: Vec<BoundaryRegion>,
}

impl RecordStore {
    /// Creates a store. Regions with a repeated code keep their first
    /// occurrence.
    #[must_use]
    pub fn new(
        population: Vec<PopulationRecord>,
        mortality: Vec<MortalityRecord>,
        mut regions: Vec<BoundaryRegion>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        regions.retain(|region| seen.insert(region.code.clone()));

        Self {
            population,
            mortality,
            regions,
        }
    }

    /// Population rows in load order.
    #[must_use]
    pub fn population(&self) -> &[PopulationRecord] {
        &self.population
    }

    /// Mortality rows in load order.
    #[must_use]
    pub fn mortality(&self) -> &[MortalityRecord] {
        &self.mortality
    }

    /// Boundary regions in collection order.
    #[must_use]
    pub fn regions(&self) -> &[BoundaryRegion] {
        &self.regions
    }

    /// Smallest range covering every mortality year, if there are any rows.
    #[must_use]
    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.mortality.iter().map(|r| r.year).min()?;
        let max = self.mortality.iter().map(|r| r.year).max()?;
        YearRange::new(min, max).ok()
    }

    /// Distinct countries of the mortality table, sorted by name.
    #[must_use]
    pub fn countries(&self) -> Vec<&str> {
        self.mortality
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether any mortality row belongs to `country`.
    #[must_use]
    pub fn has_country(&self, country: &str) -> bool {
        self.mortality.iter().any(|r| r.country == country)
    }

    /// Distinct causes of the mortality table, sorted by name.
    #[must_use]
    pub fn causes(&self) -> Vec<&str> {
        self.mortality
            .iter()
            .map(|r| r.cause.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
