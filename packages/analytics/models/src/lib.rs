#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter state and derived view types for the mortality dashboard.
//!
//! Every view here is a plain value recomputed in full from the record
//! store and a [`FilterState`]. Nothing in this crate performs aggregation;
//! it only defines what the aggregation produces.

pub mod views;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub use views::{
    AgeCauseMatrix, AgeCauseRow, AggregatedCountryStat, CauseBubble, CauseCount,
    CauseSummaryView, DashboardViews, GeoDeathRateView, SexRatioView, TimeSeriesPoint,
    TimeSeriesView,
};

/// Errors raised when constructing filter values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The lower bound of a year range exceeds the upper bound.
    #[error("Invalid year range: {from} is after {to}")]
    InvalidYearRange {
        /// Requested first year.
        from: i32,
        /// Requested last year.
        to: i32,
    },
}

/// Inclusive range of years. Always satisfies `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    from: i32,
    to: i32,
}

impl YearRange {
    /// Creates a range covering `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidYearRange`] if `from > to`.
    pub const fn new(from: i32, to: i32) -> Result<Self, AnalyticsError> {
        if from > to {
            return Err(AnalyticsError::InvalidYearRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering one year.
    #[must_use]
    pub const fn single(year: i32) -> Self {
        Self {
            from: year,
            to: year,
        }
    }

    /// First year of the range.
    #[must_use]
    pub const fn from(&self) -> i32 {
        self.from
    }

    /// Last year of the range.
    #[must_use]
    pub const fn to(&self) -> i32 {
        self.to
    }

    /// Whether `year` falls inside the range, bounds included.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// The current dashboard selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Years included in every view.
    pub year_range: YearRange,
    /// Country driving the country-scoped views.
    pub selected_country: String,
}

/// Identifies one of the derived views.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ViewKind {
    /// Death rate per boundary region.
    Geo,
    /// Deaths per country per year.
    TimeSeries,
    /// Ranked deaths per cause for the selected country.
    CauseSummary,
    /// Bubble breakdown of the ranked causes.
    CauseBubbles,
    /// Deaths per age bucket and cause for the selected country.
    AgeCauseMatrix,
    /// Male/female split for the selected country.
    SexRatio,
}

impl ViewKind {
    /// Every view kind, in publication order.
    pub const ALL: [Self; 6] = [
        Self::Geo,
        Self::TimeSeries,
        Self::CauseSummary,
        Self::CauseBubbles,
        Self::AgeCauseMatrix,
        Self::SexRatio,
    ];

    /// The views that depend on the selected country.
    pub const COUNTRY_SCOPED: [Self; 4] = [
        Self::CauseSummary,
        Self::CauseBubbles,
        Self::AgeCauseMatrix,
        Self::SexRatio,
    ];

    /// Whether the view depends on the selected country.
    #[must_use]
    pub const fn is_country_scoped(self) -> bool {
        matches!(
            self,
            Self::CauseSummary | Self::CauseBubbles | Self::AgeCauseMatrix | Self::SexRatio
        )
    }
}

/// How the ranked cause list is cut into "top" and "bottom" slices.
///
/// `skip_leading` entries are dropped from the head of the ranking before
/// either slice is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankSlicePolicy {
    /// Leading entries excluded from both slices.
    pub skip_leading: usize,
    /// Length of the top slice.
    pub top: usize,
    /// Length of the bottom slice.
    pub bottom: usize,
}

impl Default for RankSlicePolicy {
    fn default() -> Self {
        Self {
            skip_leading: 0,
            top: 5,
            bottom: 5,
        }
    }
}
