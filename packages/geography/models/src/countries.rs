//! Country name to region code utilities.
//!
//! Provides the static mapping between the free-text country names used in
//! the population and mortality tables and the three-letter codes used by
//! the boundary collection. Names missing from the table are expected and
//! simply resolve to `None`.

use std::collections::BTreeMap;

use crate::RegionCode;

/// Built-in `(country name, region code)` table for the reference dataset.
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Brunei Darussalam", "BRN"),
    ("Malaysia", "MYS"),
    ("Thailand", "THA"),
    ("Philippines", "PHL"),
    ("Singapore", "SGP"),
];

/// Bidirectional lookup between country names and [`RegionCode`]s.
///
/// Name lookups are exact (the tables use canonical spellings such as
/// `"Brunei Darussalam"`); code lookups go through [`RegionCode`]
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCodeResolver {
    by_name: BTreeMap<String, RegionCode>,
    by_code: BTreeMap<RegionCode, String>,
}

impl Default for CountryCodeResolver {
    fn default() -> Self {
        Self::from_entries(COUNTRY_CODES.iter().copied())
    }
}

impl CountryCodeResolver {
    /// Builds a resolver from `(name, code)` pairs.
    ///
    /// When a name appears more than once the last entry wins.
    #[must_use]
    pub fn from_entries<N, C>(entries: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: AsRef<str>,
    {
        let mut resolver = Self {
            by_name: BTreeMap::new(),
            by_code: BTreeMap::new(),
        };
        resolver.extend(entries);
        resolver
    }

    /// Adds or overrides entries.
    pub fn extend<N, C>(&mut self, entries: impl IntoIterator<Item = (N, C)>)
    where
        N: Into<String>,
        C: AsRef<str>,
    {
        for (name, code) in entries {
            let name = name.into();
            let code = RegionCode::new(code);

            if let Some(previous) = self.by_name.insert(name.clone(), code.clone())
                && self.by_code.get(&previous) == Some(&name)
            {
                self.by_code.remove(&previous);
            }
            self.by_code.insert(code, name);
        }
    }

    /// Maps a country name to its region code.
    ///
    /// Returns `None` for countries without a boundary mapping.
    #[must_use]
    pub fn resolve(&self, country: &str) -> Option<&RegionCode> {
        self.by_name.get(country)
    }

    /// Maps a region code back to the country name, for display.
    #[must_use]
    pub fn reverse_resolve(&self, code: &RegionCode) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    /// Number of mapped country names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterates `(name, code)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionCode)> {
        self.by_name.iter().map(|(name, code)| (name.as_str(), code))
    }
}
