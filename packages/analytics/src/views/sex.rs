//! Male/female split of deaths.

use mortality_dash_analytics_models::SexRatioView;
use mortality_dash_mortality_models::{MortalityRecord, Sex};

use crate::aggregate::group_sum;

/// Splits one country's filtered deaths by sex.
///
/// Percentages are both 0 when there are no deaths.
#[must_use]
pub fn build_sex_ratio(records: &[&MortalityRecord]) -> SexRatioView {
    let sums = group_sum(records.iter(), |r| r.sex, |r| r.deaths_all_ages);

    let male_deaths = sums.get(&Sex::Male).copied().unwrap_or(0.0);
    let female_deaths = sums.get(&Sex::Female).copied().unwrap_or(0.0);
    let total = male_deaths + female_deaths;

    let (male_percent, female_percent) = if total > 0.0 {
        let male = 100.0 * male_deaths / total;
        (male, 100.0 - male)
    } else {
        (0.0, 0.0)
    };

    SexRatioView {
        male_deaths,
        female_deaths,
        male_percent,
        female_percent,
    }
}
