//! Output types of the view builders.

use std::collections::BTreeMap;

use mortality_dash_geography_models::RegionCode;
use mortality_dash_mortality_models::AgeBucket;
use serde::Serialize;

use crate::RankSlicePolicy;

/// Population, deaths and death rate for one boundary region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCountryStat {
    /// Region code from the boundary collection.
    pub region_code: RegionCode,
    /// Display name, when the code maps back to a known country.
    pub country: Option<String>,
    /// Summed population over the selected years.
    pub population: f64,
    /// Summed deaths over the selected years.
    pub deaths: f64,
    /// `deaths / population`, or 0 when population is 0.
    pub rate: f64,
    /// Index of the rate band, `0..=6`.
    pub rate_band: u8,
    /// Fill color of the rate band.
    pub color: String,
}

/// Death rate per boundary region, in boundary-collection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoDeathRateView {
    /// One entry per boundary region.
    pub stats: Vec<AggregatedCountryStat>,
}

impl GeoDeathRateView {
    /// Looks up the stat for a region.
    #[must_use]
    pub fn get(&self, code: &RegionCode) -> Option<&AggregatedCountryStat> {
        self.stats.iter().find(|s| &s.region_code == code)
    }
}

/// Summed deaths for one cause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseCount {
    /// Cause label.
    pub cause: String,
    /// Summed deaths.
    pub count: f64,
}

/// Causes of death for the selected country, ranked by count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseSummaryView {
    /// Country the ranking was computed for.
    pub country: String,
    /// Descending by count, ties by cause name.
    pub causes: Vec<CauseCount>,
}

impl CauseSummaryView {
    fn ranked(&self, policy: &RankSlicePolicy) -> &[CauseCount] {
        let skip = policy.skip_leading.min(self.causes.len());
        &self.causes[skip..]
    }

    /// Highest-ranked causes after skipping `policy.skip_leading`.
    #[must_use]
    pub fn top(&self, policy: &RankSlicePolicy) -> &[CauseCount] {
        let ranked = self.ranked(policy);
        &ranked[..policy.top.min(ranked.len())]
    }

    /// Lowest-ranked causes, in ranking order.
    #[must_use]
    pub fn bottom(&self, policy: &RankSlicePolicy) -> &[CauseCount] {
        let ranked = self.ranked(policy);
        &ranked[ranked.len().saturating_sub(policy.bottom)..]
    }

    /// Sum of every cause count.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.causes.iter().map(|c| c.count).sum()
    }
}

/// One bubble of the cause breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseBubble {
    /// Cause label.
    pub cause: String,
    /// Summed deaths.
    pub count: f64,
    /// Fill color, stable for a given label.
    pub color: String,
}

/// Deaths per cause within one age bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeCauseRow {
    /// The bucket.
    pub bucket: AgeBucket,
    /// Display label such as `"10-19"`.
    pub label: String,
    /// Deaths per cause; every matrix cause is present.
    pub counts: BTreeMap<String, f64>,
    /// Sum of `counts`.
    pub total: f64,
}

/// Deaths per age bucket and cause for the selected country.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeCauseMatrix {
    /// Causes used to zero-fill every row, sorted by name.
    pub causes: Vec<String>,
    /// One row per age bucket, youngest first.
    pub rows: Vec<AgeCauseRow>,
}

impl AgeCauseMatrix {
    /// Sum of every row total.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

/// Male/female split of deaths for the selected country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SexRatioView {
    /// Summed male deaths.
    pub male_deaths: f64,
    /// Summed female deaths.
    pub female_deaths: f64,
    /// Male share in percent.
    pub male_percent: f64,
    /// Female share in percent.
    pub female_percent: f64,
}

/// Deaths for one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Country name.
    pub country: String,
    /// Year.
    pub year: i32,
    /// Summed deaths.
    pub count: f64,
}

/// Deaths per country per year, ordered by country then year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesView {
    /// All points.
    pub points: Vec<TimeSeriesPoint>,
}

impl TimeSeriesView {
    /// Groups the points into one line per country.
    #[must_use]
    pub fn by_country(&self) -> BTreeMap<&str, Vec<&TimeSeriesPoint>> {
        let mut lines: BTreeMap<&str, Vec<&TimeSeriesPoint>> = BTreeMap::new();
        for point in &self.points {
            lines.entry(point.country.as_str()).or_default().push(point);
        }
        lines
    }

    /// First and last year present, if any.
    #[must_use]
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let min = self.points.iter().map(|p| p.year).min()?;
        let max = self.points.iter().map(|p| p.year).max()?;
        Some((min, max))
    }
}

/// Every view, as last published.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    /// Death rate map.
    pub geo: GeoDeathRateView,
    /// Deaths over time.
    pub time_series: TimeSeriesView,
    /// Ranked causes.
    pub cause_summary: CauseSummaryView,
    /// Bubble breakdown of the ranked causes.
    pub cause_bubbles: Vec<CauseBubble>,
    /// Cause by age bucket.
    pub age_cause_matrix: AgeCauseMatrix,
    /// Sex split.
    pub sex_ratio: SexRatioView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(counts: &[(&str, f64)]) -> CauseSummaryView {
        CauseSummaryView {
            country: "Malaysia".to_string(),
            causes: counts
                .iter()
                .map(|(cause, count)| CauseCount {
                    cause: (*cause).to_string(),
                    count: *count,
                })
                .collect(),
        }
    }

    fn names(slice: &[CauseCount]) -> Vec<&str> {
        slice.iter().map(|c| c.cause.as_str()).collect()
    }

    #[test]
    fn slices_follow_policy() {
        let view = summary(&[
            ("a", 9.0),
            ("b", 8.0),
            ("c", 7.0),
            ("d", 6.0),
            ("e", 5.0),
        ]);
        let policy = RankSlicePolicy {
            skip_leading: 1,
            top: 2,
            bottom: 2,
        };
        assert_eq!(names(view.top(&policy)), ["b", "c"]);
        assert_eq!(names(view.bottom(&policy)), ["d", "e"]);
    }

    #[test]
    fn slices_clamp_to_short_lists() {
        let view = summary(&[("a", 2.0), ("b", 1.0)]);
        let policy = RankSlicePolicy::default();
        assert_eq!(names(view.top(&policy)), ["a", "b"]);
        assert_eq!(names(view.bottom(&policy)), ["a", "b"]);

        let skip_all = RankSlicePolicy {
            skip_leading: 10,
            ..policy
        };
        assert!(view.top(&skip_all).is_empty());
        assert!(view.bottom(&skip_all).is_empty());
    }

    #[test]
    fn time_series_groups_by_country() {
        let view = TimeSeriesView {
            points: vec![
                TimeSeriesPoint {
                    country: "Malaysia".to_string(),
                    year: 2000,
                    count: 1.0,
                },
                TimeSeriesPoint {
                    country: "Malaysia".to_string(),
                    year: 2001,
                    count: 2.0,
                },
                TimeSeriesPoint {
                    country: "Thailand".to_string(),
                    year: 1999,
                    count: 3.0,
                },
            ],
        };

        let lines = view.by_country();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines["Malaysia"].len(), 2);
        assert_eq!(view.year_extent(), Some((1999, 2001)));
        assert_eq!(TimeSeriesView::default().year_extent(), None);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let stat = AggregatedCountryStat {
            region_code: RegionCode::new("SGP"),
            country: Some("Singapore".to_string()),
            population: 5_000_000.0,
            deaths: 0.0,
            rate: 0.0,
            rate_band: 0,
            color: "#f7f7f7".to_string(),
        };
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["regionCode"], "SGP");
        assert_eq!(json["rateBand"], 0);
    }
}
