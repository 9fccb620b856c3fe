//! Deaths per country per year across every country.

use mortality_dash_analytics_models::{TimeSeriesPoint, TimeSeriesView};
use mortality_dash_mortality_models::MortalityRecord;

use crate::aggregate::group_sum;

/// Sums the year-filtered mortality rows per `(country, year)`.
#[must_use]
pub fn build_time_series(records: &[&MortalityRecord]) -> TimeSeriesView {
    let sums = group_sum(
        records.iter(),
        |r| (r.country.clone(), r.year),
        |r| r.deaths_all_ages,
    );

    let points = sums
        .into_iter()
        .map(|((country, year), count)| TimeSeriesPoint {
            country,
            year,
            count,
        })
        .collect();

    TimeSeriesView { points }
}

#[cfg(test)]
mod tests {
    use mortality_dash_mortality_models::Sex;

    use super::*;
    use crate::store::tests::mortality;

    #[test]
    fn points_are_ordered_by_country_then_year() {
        let rows = [
            mortality("Thailand", 2001, "Stroke", Sex::Male, 1.0),
            mortality("Malaysia", 2002, "Stroke", Sex::Male, 2.0),
            mortality("Malaysia", 2001, "Stroke", Sex::Male, 3.0),
            mortality("Malaysia", 2001, "Cancer", Sex::Female, 4.0),
        ];
        let refs: Vec<&MortalityRecord> = rows.iter().collect();

        let view = build_time_series(&refs);
        let keys: Vec<(&str, i32)> = view
            .points
            .iter()
            .map(|p| (p.country.as_str(), p.year))
            .collect();

        assert_eq!(
            keys,
            [("Malaysia", 2001), ("Malaysia", 2002), ("Thailand", 2001)]
        );
        assert!((view.points[0].count - 7.0).abs() < f64::EPSILON);
    }
}
