//! Death rate per boundary region.

use std::collections::BTreeMap;

use mortality_dash_analytics_models::{AggregatedCountryStat, GeoDeathRateView};
use mortality_dash_geography_models::countries::CountryCodeResolver;
use mortality_dash_geography_models::{BoundaryRegion, RegionCode};

use crate::aggregate::group_sum_some;
use crate::filter::FilteredRecords;
use crate::palette::{rate_band, rate_color};

/// Builds one stat per boundary region.
///
/// Records whose country has no region code are left out. Regions with no
/// matching records report zero population, deaths and rate.
#[must_use]
pub fn build_geo_view(
    regions: &[BoundaryRegion],
    filtered: &FilteredRecords<'_>,
    resolver: &CountryCodeResolver,
) -> GeoDeathRateView {
    let population: BTreeMap<RegionCode, f64> = group_sum_some(
        filtered.population.iter(),
        |r| resolver.resolve(&r.country).cloned(),
        |r| r.population,
    );
    let deaths: BTreeMap<RegionCode, f64> = group_sum_some(
        filtered.mortality.iter(),
        |r| resolver.resolve(&r.country).cloned(),
        |r| r.deaths_all_ages,
    );

    let stats = regions
        .iter()
        .map(|region| {
            let population = population.get(&region.code).copied().unwrap_or(0.0);
            let deaths = deaths.get(&region.code).copied().unwrap_or(0.0);
            let rate = if population > 0.0 {
                deaths / population
            } else {
                0.0
            };
            let band = rate_band(rate);

            AggregatedCountryStat {
                region_code: region.code.clone(),
                country: resolver.reverse_resolve(&region.code).map(str::to_owned),
                population,
                deaths,
                rate,
                rate_band: band,
                color: rate_color(band).to_string(),
            }
        })
        .collect();

    GeoDeathRateView { stats }
}
