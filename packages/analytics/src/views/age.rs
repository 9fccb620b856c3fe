//! Deaths per coarse age bucket and cause.

use std::collections::{BTreeMap, BTreeSet};

use mortality_dash_analytics_models::{AgeCauseMatrix, AgeCauseRow};
use mortality_dash_mortality_models::{AgeBucket, MortalityRecord};

use crate::aggregate::{finite_or_zero, group_sum};

/// Folds each record's fine age bands into the ten buckets, per cause.
///
/// Every cause present in `records` appears in every row, with 0 where it
/// has no deaths in that bucket.
#[must_use]
pub fn build_age_cause_matrix(records: &[&MortalityRecord]) -> AgeCauseMatrix {
    let causes: BTreeSet<&str> = records.iter().map(|r| r.cause.as_str()).collect();

    let sums: BTreeMap<(AgeBucket, String), f64> = group_sum(
        records.iter().flat_map(|r| {
            let record: &MortalityRecord = r;
            record
                .deaths_by_age
                .iter()
                .map(move |(band, count)| (band.bucket(), record.cause.as_str(), count))
        }),
        |(bucket, cause, _)| (*bucket, (*cause).to_owned()),
        |(_, _, count)| finite_or_zero(*count),
    );

    let rows = AgeBucket::all()
        .iter()
        .map(|bucket| {
            let counts: BTreeMap<String, f64> = causes
                .iter()
                .map(|cause| {
                    let count = sums
                        .get(&(*bucket, (*cause).to_owned()))
                        .copied()
                        .unwrap_or(0.0);
                    ((*cause).to_owned(), count)
                })
                .collect();
            let total = counts.values().sum();

            AgeCauseRow {
                bucket: *bucket,
                label: bucket.label().to_owned(),
                counts,
                total,
            }
        })
        .collect();

    AgeCauseMatrix {
        causes: causes.into_iter().map(str::to_owned).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use mortality_dash_mortality_models::{FineAgeBand, FineAgeDeaths, Sex};

    use super::*;
    use crate::store::tests::mortality;

    fn with_bands(cause: &str, bands: &[(FineAgeBand, f64)]) -> MortalityRecord {
        let mut record = mortality("Malaysia", 2010, cause, Sex::Male, 0.0);
        record.deaths_by_age = FineAgeDeaths::default();
        for (band, count) in bands {
            record.deaths_by_age.set(*band, *count);
        }
        record.deaths_all_ages = bands.iter().map(|(_, c)| c).sum();
        record
    }

    #[test]
    fn folds_bands_into_buckets() {
        let rows = [with_bands(
            "Stroke",
            &[
                (FineAgeBand::Age0, 1.0),
                (FineAgeBand::Age4, 2.0),
                (FineAgeBand::Age5To9, 3.0),
                (FineAgeBand::Age10To14, 4.0),
                (FineAgeBand::Age15To19, 5.0),
                (FineAgeBand::Age90To94, 6.0),
                (FineAgeBand::Age95Plus, 7.0),
            ],
        )];
        let refs: Vec<&MortalityRecord> = rows.iter().collect();

        let matrix = build_age_cause_matrix(&refs);

        assert_eq!(matrix.rows.len(), 10);
        assert_eq!(matrix.rows[0].label, "0-9");
        assert!((matrix.rows[0].counts["Stroke"] - 6.0).abs() < f64::EPSILON);
        assert!((matrix.rows[1].counts["Stroke"] - 9.0).abs() < f64::EPSILON);
        assert!((matrix.rows[9].counts["Stroke"] - 13.0).abs() < f64::EPSILON);
        assert!((matrix.total() - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_row_is_zero_filled() {
        let rows = [
            with_bands("Stroke", &[(FineAgeBand::Age0, 1.0)]),
            with_bands("Cancer", &[(FineAgeBand::Age70To74, 2.0)]),
        ];
        let refs: Vec<&MortalityRecord> = rows.iter().collect();

        let matrix = build_age_cause_matrix(&refs);

        assert_eq!(matrix.causes, ["Cancer", "Stroke"]);
        for row in &matrix.rows {
            assert_eq!(row.counts.len(), 2, "row {}", row.label);
        }
        assert!(matrix.rows[0].counts["Cancer"].abs() < f64::EPSILON);
        assert!((matrix.rows[7].counts["Cancer"] - 2.0).abs() < f64::EPSILON);
        assert!((matrix.rows[7].total - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_selection_still_has_ten_rows() {
        let matrix = build_age_cause_matrix(&[]);
        assert_eq!(matrix.rows.len(), 10);
        assert!(matrix.causes.is_empty());
        assert!(matrix.total().abs() < f64::EPSILON);
    }
}
