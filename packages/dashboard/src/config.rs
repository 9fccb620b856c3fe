//! Engine configuration.
//!
//! The configuration is read from, in order of precedence: an explicit
//! path, the `MORTALITY_DASH_CONFIG` environment variable, or the default
//! embedded at compile time from `config/default.toml`.

use std::path::{Path, PathBuf};

use mortality_dash_analytics::ViewOptions;
use mortality_dash_analytics_models::RankSlicePolicy;
use mortality_dash_geography_models::countries::CountryCodeResolver;
use mortality_dash_ingest::DatasetSources;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "MORTALITY_DASH_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors that can occur while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`EngineConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Paths of the input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Population CSV.
    pub population: PathBuf,
    /// Mortality CSV.
    pub mortality: PathBuf,
    /// Boundary `GeoJSON`.
    pub boundaries: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            population: PathBuf::from("data/population.csv"),
            mortality: PathBuf::from("data/death2.csv"),
            boundaries: PathBuf::from("data/world.geojson"),
        }
    }
}

/// View settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Country selected after loading, when present in the data.
    pub default_country: Option<String>,
    /// Cause label of aggregate rows. Empty disables the exclusion.
    pub all_cause_label: String,
    /// Top/bottom slicing of the cause ranking.
    pub ranking: RankSlicePolicy,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            default_country: None,
            all_cause_label: "All causes".to_string(),
            ranking: RankSlicePolicy::default(),
        }
    }
}

/// Extra country name to region code mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    /// Country name as spelled in the tables.
    pub name: String,
    /// Region code in the boundary collection.
    pub code: String,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Input files.
    pub data: DataConfig,
    /// View settings.
    pub views: ViewsConfig,
    /// Resolver entries added on top of the built-in table.
    pub countries: Vec<CountryEntry>,
}

impl EngineConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The configuration embedded in the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded `config/default.toml` is invalid.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse default.toml: {e}"))
    }

    /// Loads the configuration from `explicit`, then [`CONFIG_ENV_VAR`],
    /// then the embedded default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named file cannot be read or parsed.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Using config {}", path.display());
            return Self::from_path(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            log::info!("Using config {} from {CONFIG_ENV_VAR}", path.display());
            return Self::from_path(&path);
        }

        log::debug!("Using embedded default config");
        Ok(Self::embedded())
    }

    /// The built-in country table extended with [`Self::countries`].
    #[must_use]
    pub fn resolver(&self) -> CountryCodeResolver {
        let mut resolver = CountryCodeResolver::default();
        resolver.extend(
            self.countries
                .iter()
                .map(|entry| (entry.name.clone(), entry.code.as_str())),
        );
        resolver
    }

    /// Options passed to the view engine.
    #[must_use]
    pub fn view_options(&self) -> ViewOptions {
        let label = self.views.all_cause_label.trim();
        ViewOptions {
            all_cause_label: (!label.is_empty()).then(|| label.to_owned()),
        }
    }

    /// Input paths for the loader.
    #[must_use]
    pub fn sources(&self) -> DatasetSources {
        DatasetSources {
            population: self.data.population.clone(),
            mortality: self.data.mortality.clone(),
            boundaries: self.data.boundaries.clone(),
        }
    }
}
