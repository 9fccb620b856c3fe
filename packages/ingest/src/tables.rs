//! CSV parsers for the population and mortality tables.
//!
//! Columns are located by header name, so column order in the file does not
//! matter. Count fields go through [`coerce_count`]; rows that cannot be
//! placed in any view (unparseable year, unknown sex) are skipped and
//! counted.

use std::io::Read;

use mortality_dash_mortality_models::{
    FineAgeBand, FineAgeDeaths, MortalityRecord, PopulationRecord, Sex,
};

use crate::IngestError;
use crate::parsing::{coerce_count, parse_year};

/// Header of the country column in both tables.
pub const COUNTRY_COLUMN: &str = "Country";
/// Header of the year column in both tables.
pub const YEAR_COLUMN: &str = "Year";
/// Header of the population count column.
pub const POPULATION_COLUMN: &str = "Population at all ages";
/// Header of the cause column.
pub const CAUSE_COLUMN: &str = "Cause";
/// Header of the sex column.
pub const SEX_COLUMN: &str = "Sex";
/// Header of the all-ages death count column.
pub const DEATHS_COLUMN: &str = "Deaths at all ages";

/// Records parsed from one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable<T> {
    /// Successfully parsed rows, in file order.
    pub records: Vec<T>,
    /// Rows dropped because they could not be attributed.
    pub skipped: usize,
}

/// Header positions of one CSV file.
struct Columns {
    table: &'static str,
    headers: Vec<String>,
}

impl Columns {
    fn read<R: Read>(
        reader: &mut csv::Reader<R>,
        table: &'static str,
    ) -> Result<Self, IngestError> {
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
            .collect();

        Ok(Self { table, headers })
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    fn require(&self, name: &str) -> Result<usize, IngestError> {
        self.find(name).ok_or_else(|| IngestError::MissingColumn {
            table: self.table,
            column: name.to_string(),
        })
    }
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(input)
}

fn field(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

/// Parses the population table.
///
/// # Errors
///
/// Returns [`IngestError`] if the CSV is malformed or a required column is
/// missing.
pub fn parse_population<R: Read>(input: R) -> Result<ParsedTable<PopulationRecord>, IngestError> {
    let mut reader = csv_reader(input);
    let columns = Columns::read(&mut reader, "population")?;

    let country_idx = columns.require(COUNTRY_COLUMN)?;
    let year_idx = columns.require(YEAR_COLUMN)?;
    let population_idx = columns.require(POPULATION_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let Some(year) = parse_year(field(&record, year_idx)) else {
            log::warn!(
                "population row {}: invalid year {:?}, skipping",
                row + 1,
                field(&record, year_idx)
            );
            skipped += 1;
            continue;
        };

        records.push(PopulationRecord {
            country: field(&record, country_idx).to_owned(),
            year,
            population: coerce_count(field(&record, population_idx)),
        });
    }

    log::info!(
        "Parsed {} population records ({skipped} skipped)",
        records.len()
    );

    Ok(ParsedTable { records, skipped })
}

/// Parses the mortality table.
///
/// Fine age band columns are optional; a missing band reads as 0.
///
/// # Errors
///
/// Returns [`IngestError`] if the CSV is malformed or a required column is
/// missing.
pub fn parse_mortality<R: Read>(input: R) -> Result<ParsedTable<MortalityRecord>, IngestError> {
    let mut reader = csv_reader(input);
    let columns = Columns::read(&mut reader, "mortality")?;

    let country_idx = columns.require(COUNTRY_COLUMN)?;
    let year_idx = columns.require(YEAR_COLUMN)?;
    let cause_idx = columns.require(CAUSE_COLUMN)?;
    let sex_idx = columns.require(SEX_COLUMN)?;
    let deaths_idx = columns.require(DEATHS_COLUMN)?;

    let band_idx: Vec<(FineAgeBand, Option<usize>)> = FineAgeBand::all()
        .iter()
        .map(|band| {
            let idx = band
                .column_aliases()
                .iter()
                .find_map(|alias| columns.find(alias));
            if idx.is_none() {
                log::warn!(
                    "mortality table has no column for age band {}, reading as 0",
                    band.label()
                );
            }
            (*band, idx)
        })
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let Some(year) = parse_year(field(&record, year_idx)) else {
            log::warn!(
                "mortality row {}: invalid year {:?}, skipping",
                row + 1,
                field(&record, year_idx)
            );
            skipped += 1;
            continue;
        };

        let Ok(sex) = field(&record, sex_idx).parse::<Sex>() else {
            log::warn!(
                "mortality row {}: unknown sex {:?}, skipping",
                row + 1,
                field(&record, sex_idx)
            );
            skipped += 1;
            continue;
        };

        let mut deaths_by_age = FineAgeDeaths::default();
        for (band, idx) in &band_idx {
            if let Some(idx) = idx {
                deaths_by_age.set(*band, coerce_count(field(&record, *idx)));
            }
        }

        records.push(MortalityRecord {
            country: field(&record, country_idx).to_owned(),
            year,
            cause: field(&record, cause_idx).to_owned(),
            sex,
            deaths_all_ages: coerce_count(field(&record, deaths_idx)),
            deaths_by_age,
        });
    }

    log::info!(
        "Parsed {} mortality records ({skipped} skipped)",
        records.len()
    );

    Ok(ParsedTable { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_population_rows() {
        let csv = "Country,Year,Population at all ages\n\
                   Malaysia,2010,28000000\n\
                   Singapore,2015,5000000\n";
        let table = parse_population(csv.as_bytes()).unwrap();

        assert_eq!(table.skipped, 0);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[1].country, "Singapore");
        assert_eq!(table.records[1].year, 2015);
        assert!(approx(table.records[1].population, 5_000_000.0));
    }

    #[test]
    fn population_columns_can_be_reordered() {
        let csv = "Population at all ages, Year ,Country\n100,2001,Thailand\n";
        let table = parse_population(csv.as_bytes()).unwrap();
        assert_eq!(table.records[0].country, "Thailand");
        assert_eq!(table.records[0].year, 2001);
        assert!(approx(table.records[0].population, 100.0));
    }

    #[test]
    fn non_numeric_population_coerces_to_zero() {
        let csv = "Country,Year,Population at all ages\nBrunei Darussalam,2003,unknown\n";
        let table = parse_population(csv.as_bytes()).unwrap();
        assert!(approx(table.records[0].population, 0.0));
    }

    #[test]
    fn invalid_year_rows_are_skipped() {
        let csv = "Country,Year,Population at all ages\nMalaysia,,10\nMalaysia,2004,20\n";
        let table = parse_population(csv.as_bytes()).unwrap();
        assert_eq!(table.skipped, 1);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].year, 2004);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "Country,Population at all ages\nMalaysia,10\n";
        let err = parse_population(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, IngestError::MissingColumn { ref column, .. } if column == "Year"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn parses_mortality_with_source_headers() {
        let csv = "Country,Year,Cause,Sex,Deaths at all ages,Deaths at age 0 year,\
                   Deaths at age 5-9 years,Deaths at age 95 years and above\n\
                   Malaysia,2010,Heart disease,Male,100,3,x,7\n";
        let table = parse_mortality(csv.as_bytes()).unwrap();
        let record = &table.records[0];

        assert_eq!(record.cause, "Heart disease");
        assert_eq!(record.sex, Sex::Male);
        assert!(approx(record.deaths_all_ages, 100.0));
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age0), 3.0));
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age5To9), 0.0));
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age95Plus), 7.0));
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age40To44), 0.0));
    }

    #[test]
    fn parses_mortality_with_short_headers() {
        let csv = "Country,Year,Cause,Sex,Deaths at all ages,0,10-14,95 years and above\n\
                   Thailand,2012,Stroke,Female,9,1,2,6\n";
        let table = parse_mortality(csv.as_bytes()).unwrap();
        let record = &table.records[0];

        assert_eq!(record.sex, Sex::Female);
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age0), 1.0));
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age10To14), 2.0));
        assert!(approx(record.deaths_by_age.get(FineAgeBand::Age95Plus), 6.0));
    }

    #[test]
    fn unknown_sex_rows_are_skipped() {
        let csv = "Country,Year,Cause,Sex,Deaths at all ages\n\
                   Malaysia,2010,Stroke,Both,5\n\
                   Malaysia,2010,Stroke,female,4\n";
        let table = parse_mortality(csv.as_bytes()).unwrap();
        assert_eq!(table.skipped, 1);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].sex, Sex::Female);
    }

    #[test]
    fn short_rows_read_missing_fields_as_zero() {
        let csv = "Country,Year,Cause,Sex,Deaths at all ages,0\n\
                   Malaysia,2010,Stroke,Male\n";
        let table = parse_mortality(csv.as_bytes()).unwrap();
        assert!(approx(table.records[0].deaths_all_ages, 0.0));
        assert!(approx(
            table.records[0].deaths_by_age.get(FineAgeBand::Age0),
            0.0
        ));
    }
}
