//! Year and country predicates over the record sets.

use mortality_dash_analytics_models::YearRange;
use mortality_dash_mortality_models::{MortalityRecord, PopulationRecord};

use crate::store::RecordStore;

/// Records that carry a year.
pub trait YearKeyed {
    /// Year of the record.
    fn year(&self) -> i32;
}

/// Records that carry a country name.
pub trait CountryKeyed {
    /// Country of the record.
    fn country(&self) -> &str;
}

impl YearKeyed for PopulationRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for MortalityRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl CountryKeyed for PopulationRecord {
    fn country(&self) -> &str {
        &self.country
    }
}

impl CountryKeyed for MortalityRecord {
    fn country(&self) -> &str {
        &self.country
    }
}

/// Keeps the records whose year lies in `range`, bounds included.
#[must_use]
pub fn filter_by_year<'a, R: YearKeyed>(records: &'a [R], range: &YearRange) -> Vec<&'a R> {
    records.iter().filter(|r| range.contains(r.year())).collect()
}

/// Keeps the records belonging to `country`.
#[must_use]
pub fn filter_by_country<'a, R: CountryKeyed>(records: &[&'a R], country: &str) -> Vec<&'a R> {
    records
        .iter()
        .copied()
        .filter(|r| r.country() == country)
        .collect()
}

/// Both record sets restricted to one year range.
///
/// Mortality rows whose cause equals the all-cause label are dropped here so
/// that every view built from the same filtered input agrees on totals.
#[derive(Debug, Clone)]
pub struct FilteredRecords<'a> {
    /// Population rows in range.
    pub population: Vec<&'a PopulationRecord>,
    /// Mortality rows in range.
    pub mortality: Vec<&'a MortalityRecord>,
}

impl<'a> FilteredRecords<'a> {
    /// Filters `store` to `range`, excluding rows labelled `all_cause_label`.
    #[must_use]
    pub fn new(store: &'a RecordStore, range: &YearRange, all_cause_label: Option<&str>) -> Self {
        let mut mortality = filter_by_year(store.mortality(), range);
        if let Some(label) = all_cause_label {
            mortality.retain(|r| r.cause != label);
        }

        let filtered = Self {
            population: filter_by_year(store.population(), range),
            mortality,
        };

        log::debug!(
            "Filtered to {range}: {} population rows, {} mortality rows",
            filtered.population.len(),
            filtered.mortality.len()
        );

        filtered
    }

    /// Mortality rows in range for one country.
    #[must_use]
    pub fn mortality_for(&self, country: &str) -> Vec<&'a MortalityRecord> {
        filter_by_country(&self.mortality, country)
    }
}
