#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Population and mortality record types and age band definitions.
//!
//! Records are created once when the tables are loaded and never mutated
//! afterwards. The fine age bands mirror the columns of the raw mortality
//! table; the coarse [`AgeBucket`]s are the ten ranges shown in the stacked
//! cause-by-age chart.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sex of the deceased as recorded in the mortality table.
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
#[strum(ascii_case_insensitive)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

/// One narrow age interval column of the raw mortality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FineAgeBand {
    /// Age 0
    Age0,
    /// Age 1
    Age1,
    /// Age 2
    Age2,
    /// Age 3
    Age3,
    /// Age 4
    Age4,
    /// Ages 5-9
    Age5To9,
    /// Ages 10-14
    Age10To14,
    /// Ages 15-19
    Age15To19,
    /// Ages 20-24
    Age20To24,
    /// Ages 25-29
    Age25To29,
    /// Ages 30-34
    Age30To34,
    /// Ages 35-39
    Age35To39,
    /// Ages 40-44
    Age40To44,
    /// Ages 45-49
    Age45To49,
    /// Ages 50-54
    Age50To54,
    /// Ages 55-59
    Age55To59,
    /// Ages 60-64
    Age60To64,
    /// Ages 65-69
    Age65To69,
    /// Ages 70-74
    Age70To74,
    /// Ages 75-79
    Age75To79,
    /// Ages 80-84
    Age80To84,
    /// Ages 85-89
    Age85To89,
    /// Ages 90-94
    Age90To94,
    /// Ages 95 and above
    Age95Plus,
}

impl FineAgeBand {
    /// Number of fine age bands.
    pub const COUNT: usize = 24;

    /// Returns all bands in ascending age order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Age0,
            Self::Age1,
            Self::Age2,
            Self::Age3,
            Self::Age4,
            Self::Age5To9,
            Self::Age10To14,
            Self::Age15To19,
            Self::Age20To24,
            Self::Age25To29,
            Self::Age30To34,
            Self::Age35To39,
            Self::Age40To44,
            Self::Age45To49,
            Self::Age50To54,
            Self::Age55To59,
            Self::Age60To64,
            Self::Age65To69,
            Self::Age70To74,
            Self::Age75To79,
            Self::Age80To84,
            Self::Age85To89,
            Self::Age90To94,
            Self::Age95Plus,
        ]
    }

    /// Position of this band in [`FineAgeBand::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short label (e.g. `"0"`, `"5-9"`, `"95+"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age0 => "0",
            Self::Age1 => "1",
            Self::Age2 => "2",
            Self::Age3 => "3",
            Self::Age4 => "4",
            Self::Age5To9 => "5-9",
            Self::Age10To14 => "10-14",
            Self::Age15To19 => "15-19",
            Self::Age20To24 => "20-24",
            Self::Age25To29 => "25-29",
            Self::Age30To34 => "30-34",
            Self::Age35To39 => "35-39",
            Self::Age40To44 => "40-44",
            Self::Age45To49 => "45-49",
            Self::Age50To54 => "50-54",
            Self::Age55To59 => "55-59",
            Self::Age60To64 => "60-64",
            Self::Age65To69 => "65-69",
            Self::Age70To74 => "70-74",
            Self::Age75To79 => "75-79",
            Self::Age80To84 => "80-84",
            Self::Age85To89 => "85-89",
            Self::Age90To94 => "90-94",
            Self::Age95Plus => "95+",
        }
    }

    /// Header spellings accepted for this band's column.
    ///
    /// Covers the short label and the long form used by the published
    /// dataset (`"Deaths at age 5-9 years"`).
    #[must_use]
    pub fn column_aliases(self) -> Vec<String> {
        let label = self.label();
        match self {
            Self::Age0 | Self::Age1 | Self::Age2 | Self::Age3 | Self::Age4 => vec![
                label.to_string(),
                format!("Deaths at age {label} year"),
                format!("Deaths at age {label} years"),
            ],
            Self::Age95Plus => vec![
                label.to_string(),
                "95 years and above".to_string(),
                "Deaths at age 95 years and above".to_string(),
            ],
            _ => vec![label.to_string(), format!("Deaths at age {label} years")],
        }
    }

    /// The coarse bucket this band is folded into.
    #[must_use]
    pub const fn bucket(self) -> AgeBucket {
        match self {
            Self::Age0 | Self::Age1 | Self::Age2 | Self::Age3 | Self::Age4 | Self::Age5To9 => {
                AgeBucket::Age0To9
            }
            Self::Age10To14 | Self::Age15To19 => AgeBucket::Age10To19,
            Self::Age20To24 | Self::Age25To29 => AgeBucket::Age20To29,
            Self::Age30To34 | Self::Age35To39 => AgeBucket::Age30To39,
            Self::Age40To44 | Self::Age45To49 => AgeBucket::Age40To49,
            Self::Age50To54 | Self::Age55To59 => AgeBucket::Age50To59,
            Self::Age60To64 | Self::Age65To69 => AgeBucket::Age60To69,
            Self::Age70To74 | Self::Age75To79 => AgeBucket::Age70To79,
            Self::Age80To84 | Self::Age85To89 => AgeBucket::Age80To89,
            Self::Age90To94 | Self::Age95Plus => AgeBucket::Age90Plus,
        }
    }
}

/// One of the ten fixed coarse age ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    /// Ages 0-9
    Age0To9,
    /// Ages 10-19
    Age10To19,
    /// Ages 20-29
    Age20To29,
    /// Ages 30-39
    Age30To39,
    /// Ages 40-49
    Age40To49,
    /// Ages 50-59
    Age50To59,
    /// Ages 60-69
    Age60To69,
    /// Ages 70-79
    Age70To79,
    /// Ages 80-89
    Age80To89,
    /// Ages 90 and above
    Age90Plus,
}

impl AgeBucket {
    /// Number of buckets.
    pub const COUNT: usize = 10;

    /// Returns all buckets in ascending age order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Age0To9,
            Self::Age10To19,
            Self::Age20To29,
            Self::Age30To39,
            Self::Age40To49,
            Self::Age50To59,
            Self::Age60To69,
            Self::Age70To79,
            Self::Age80To89,
            Self::Age90Plus,
        ]
    }

    /// Position of this bucket in [`AgeBucket::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis label (e.g. `"0-9"`, `"90+"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age0To9 => "0-9",
            Self::Age10To19 => "10-19",
            Self::Age20To29 => "20-29",
            Self::Age30To39 => "30-39",
            Self::Age40To49 => "40-49",
            Self::Age50To59 => "50-59",
            Self::Age60To69 => "60-69",
            Self::Age70To79 => "70-79",
            Self::Age80To89 => "80-89",
            Self::Age90Plus => "90+",
        }
    }

    /// The fine bands that make up this bucket.
    #[must_use]
    pub fn bands(self) -> Vec<FineAgeBand> {
        FineAgeBand::all()
            .iter()
            .copied()
            .filter(|band| band.bucket() == self)
            .collect()
    }
}

/// Death counts per fine age band for one mortality row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FineAgeDeaths([f64; FineAgeBand::COUNT]);

impl FineAgeDeaths {
    /// Builds counts from a function of the band.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(FineAgeBand) -> f64) -> Self {
        let mut counts = [0.0; FineAgeBand::COUNT];
        for band in FineAgeBand::all() {
            counts[band.index()] = f(*band);
        }
        Self(counts)
    }

    /// Death count for one band.
    #[must_use]
    pub const fn get(&self, band: FineAgeBand) -> f64 {
        self.0[band.index()]
    }

    /// Sets the death count for one band.
    pub const fn set(&mut self, band: FineAgeBand, count: f64) {
        self.0[band.index()] = count;
    }

    /// Iterates `(band, count)` pairs in age order.
    pub fn iter(&self) -> impl Iterator<Item = (FineAgeBand, f64)> + '_ {
        FineAgeBand::all().iter().map(|band| (*band, self.get(*band)))
    }
}

/// One row of the population table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    /// Country name as written in the table.
    pub country: String,
    /// Calendar year.
    pub year: i32,
    /// Population at all ages.
    pub population: f64,
}

/// One row of the mortality table: deaths for a country, year, cause and sex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortalityRecord {
    /// Country name as written in the table.
    pub country: String,
    /// Calendar year.
    pub year: i32,
    /// Cause of death label.
    pub cause: String,
    /// Sex of the deceased.
    pub sex: Sex,
    /// Deaths at all ages.
    pub deaths_all_ages: f64,
    /// Deaths split by fine age band.
    pub deaths_by_age: FineAgeDeaths,
}
