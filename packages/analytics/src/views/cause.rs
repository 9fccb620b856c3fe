//! Ranked cause summary and the bubble breakdown built from it.

use mortality_dash_analytics_models::{CauseBubble, CauseCount, CauseSummaryView};
use mortality_dash_mortality_models::MortalityRecord;

use crate::aggregate::group_sum;
use crate::palette::cause_color;

/// Ranks causes for one country's filtered records.
///
/// Sorted by descending count; equal counts are ordered by cause name.
#[must_use]
pub fn build_cause_summary(country: &str, records: &[&MortalityRecord]) -> CauseSummaryView {
    let sums = group_sum(
        records.iter(),
        |r| r.cause.clone(),
        |r| r.deaths_all_ages,
    );

    let mut causes: Vec<CauseCount> = sums
        .into_iter()
        .map(|(cause, count)| CauseCount { cause, count })
        .collect();
    causes.sort_by(|a, b| {
        b.count
            .total_cmp(&a.count)
            .then_with(|| a.cause.cmp(&b.cause))
    });

    CauseSummaryView {
        country: country.to_owned(),
        causes,
    }
}

/// One bubble per ranked cause, in ranking order.
#[must_use]
pub fn build_cause_bubbles(summary: &CauseSummaryView) -> Vec<CauseBubble> {
    summary
        .causes
        .iter()
        .map(|c| CauseBubble {
            cause: c.cause.clone(),
            count: c.count,
            color: cause_color(&c.cause).to_string(),
        })
        .collect()
}
