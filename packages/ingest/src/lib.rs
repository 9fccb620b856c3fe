#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of the population table, the mortality table and the boundary
//! collection.
//!
//! [`load_datasets`] is the one-shot asynchronous load that precedes any
//! aggregation: the three files are read concurrently, parsed on the
//! blocking pool, and returned together. Any failure fails the whole load,
//! so callers never see a partial result.

pub mod parsing;
pub mod progress;
pub mod tables;

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mortality_dash_geography::GeoError;
use mortality_dash_geography::boundaries::parse_boundary_regions;
use mortality_dash_geography_models::BoundaryRegion;
use mortality_dash_mortality_models::{MortalityRecord, PopulationRecord};
use thiserror::Error;

use crate::progress::ProgressCallback;

/// Errors that can occur while loading the input datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A file could not be read or decompressed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from a table header.
    #[error("The {table} table has no '{column}' column")]
    MissingColumn {
        /// Which table was being parsed.
        table: &'static str,
        /// Missing header name.
        column: String,
    },

    /// The boundary collection could not be parsed.
    #[error("Boundary error: {0}")]
    Geo(#[from] GeoError),

    /// A blocking parse task panicked or was cancelled.
    #[error("Parse task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Paths of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSources {
    /// Population CSV (optionally `.gz`).
    pub population: PathBuf,
    /// Mortality CSV (optionally `.gz`).
    pub mortality: PathBuf,
    /// `GeoJSON` boundary collection (optionally `.gz`).
    pub boundaries: PathBuf,
}

/// Everything the aggregation engine needs, fully loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDatasets {
    /// Population rows.
    pub population: Vec<PopulationRecord>,
    /// Mortality rows.
    pub mortality: Vec<MortalityRecord>,
    /// Regions of the boundary collection, in collection order.
    pub regions: Vec<BoundaryRegion>,
    /// Rows skipped across both tables.
    pub skipped_rows: usize,
}

/// Reads a file into memory, gunzipping it when the name ends in `.gz`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read or decompressed.
pub async fn read_file(path: &Path) -> Result<Vec<u8>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        let mut decoder = flate2::read::GzDecoder::new(bytes.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).map_err(io_err)?;
        log::debug!("Decompressed to {} bytes", decompressed.len());
        return Ok(decompressed);
    }

    Ok(bytes)
}

/// Loads all three inputs concurrently.
///
/// Progress is reported as three steps, one per file.
///
/// # Errors
///
/// Returns [`IngestError`] if any of the files fails to read or parse.
pub async fn load_datasets(
    sources: &DatasetSources,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<LoadedDatasets, IngestError> {
    progress.set_total(3);
    progress.set_message("Loading datasets".to_string());

    let (population, mortality, regions) = tokio::try_join!(
        load_population(&sources.population, progress),
        load_mortality(&sources.mortality, progress),
        load_boundaries(&sources.boundaries, progress),
    )?;

    log::info!(
        "Loaded {} population rows, {} mortality rows, {} boundary regions",
        population.records.len(),
        mortality.records.len(),
        regions.len()
    );
    progress.finish(format!(
        "Loaded {} mortality rows",
        mortality.records.len()
    ));

    Ok(LoadedDatasets {
        population: population.records,
        mortality: mortality.records,
        regions,
        skipped_rows: population.skipped + mortality.skipped,
    })
}

async fn load_population(
    path: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<tables::ParsedTable<PopulationRecord>, IngestError> {
    let bytes = read_file(path).await?;
    let table =
        tokio::task::spawn_blocking(move || tables::parse_population(bytes.as_slice())).await??;
    progress.inc(1);
    Ok(table)
}

async fn load_mortality(
    path: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<tables::ParsedTable<MortalityRecord>, IngestError> {
    let bytes = read_file(path).await?;
    let table =
        tokio::task::spawn_blocking(move || tables::parse_mortality(bytes.as_slice())).await??;
    progress.inc(1);
    Ok(table)
}

async fn load_boundaries(
    path: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<BoundaryRegion>, IngestError> {
    let bytes = read_file(path).await?;
    let regions = tokio::task::spawn_blocking(move || {
        let text = String::from_utf8_lossy(&bytes);
        parse_boundary_regions(&text)
    })
    .await??;
    progress.inc(1);
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::progress::null_progress;

    const POPULATION_CSV: &str = "Country,Year,Population at all ages\n\
                                  Malaysia,2010,1000\n\
                                  Singapore,2015,5000000\n";

    const MORTALITY_CSV: &str = "Country,Year,Cause,Sex,Deaths at all ages,Deaths at age 0 year\n\
                                 Malaysia,2010,Heart disease,Male,100,1\n\
                                 Malaysia,2010,Heart disease,Female,50,2\n\
                                 Malaysia,2010,Heart disease,Unknown,50,2\n";

    const BOUNDARIES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","id":"MYS","properties":{"name":"Malaysia"},"geometry":null},
        {"type":"Feature","id":"SGP","properties":{"name":"Singapore"},"geometry":null}
    ]}"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mortality_dash_ingest_{name}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_sources(dir: &Path, gzip_mortality: bool) -> DatasetSources {
        let population = dir.join("population.csv");
        std::fs::write(&population, POPULATION_CSV).unwrap();

        let mortality = if gzip_mortality {
            let path = dir.join("mortality.csv.gz");
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(MORTALITY_CSV.as_bytes()).unwrap();
            std::fs::write(&path, encoder.finish().unwrap()).unwrap();
            path
        } else {
            let path = dir.join("mortality.csv");
            std::fs::write(&path, MORTALITY_CSV).unwrap();
            path
        };

        let boundaries = dir.join("world.geojson");
        std::fs::write(&boundaries, BOUNDARIES).unwrap();

        DatasetSources {
            population,
            mortality,
            boundaries,
        }
    }

    #[tokio::test]
    async fn loads_all_three_inputs() {
        let dir = scratch_dir("plain");
        let sources = write_sources(&dir, false);

        let loaded = load_datasets(&sources, &null_progress()).await.unwrap();

        assert_eq!(loaded.population.len(), 2);
        assert_eq!(loaded.mortality.len(), 2);
        assert_eq!(loaded.regions.len(), 2);
        assert_eq!(loaded.skipped_rows, 1);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn reads_gzipped_tables() {
        let dir = scratch_dir("gzip");
        let sources = write_sources(&dir, true);

        let loaded = load_datasets(&sources, &null_progress()).await.unwrap();
        assert_eq!(loaded.mortality.len(), 2);
        assert_eq!(loaded.mortality[1].deaths_all_ages.round() as i64, 50);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_file_fails_the_whole_load() {
        let dir = scratch_dir("missing");
        let mut sources = write_sources(&dir, false);
        sources.boundaries = dir.join("does-not-exist.geojson");

        let err = load_datasets(&sources, &null_progress()).await.unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }), "unexpected error: {err}");

        std::fs::remove_dir_all(dir).ok();
    }
}
