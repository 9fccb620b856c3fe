//! Terminal output of published views.

use mortality_dash_analytics_models::{CauseCount, RankSlicePolicy};
use mortality_dash_dashboard::{ViewSink, ViewUpdate};

/// Serializes an update as JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn to_json(update: &ViewUpdate, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(update)
    } else {
        serde_json::to_string(update)
    }
}

/// Prints a short text summary of every update.
pub struct SummarySink {
    ranking: RankSlicePolicy,
}

impl SummarySink {
    /// Creates a sink that prints the ranking slices chosen by `ranking`.
    #[must_use]
    pub const fn new(ranking: RankSlicePolicy) -> Self {
        Self { ranking }
    }
}

fn print_causes(title: &str, causes: &[CauseCount]) {
    println!("  {title}:");
    for cause in causes {
        println!("    {:<40} {:>12.0}", cause.cause, cause.count);
    }
}

impl ViewSink for SummarySink {
    fn publish(&mut self, update: &ViewUpdate) {
        let views = &update.views;
        let changed: Vec<String> = update.changed.iter().map(ToString::to_string).collect();

        println!();
        println!(
            "{} | {} | updated: {}",
            update.filter.selected_country,
            update.filter.year_range,
            changed.join(", ")
        );
        println!(
            "  Deaths by sex: male {:.2}%, female {:.2}%",
            views.sex_ratio.male_percent, views.sex_ratio.female_percent
        );
        print_causes("Top causes", views.cause_summary.top(&self.ranking));
        print_causes("Bottom causes", views.cause_summary.bottom(&self.ranking));

        if let Some((first, last)) = views.time_series.year_extent() {
            println!(
                "  Time series: {} countries, {first}-{last}",
                views.time_series.by_country().len()
            );
        }
    }
}
