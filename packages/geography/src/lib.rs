#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary collection handling.
//!
//! Reads the `GeoJSON` region collection that backs the choropleth map and
//! reduces it to the list of [`BoundaryRegion`]s the aggregation engine
//! needs. Geometry is discarded after parsing.
//!
//! [`BoundaryRegion`]: mortality_dash_geography_models::BoundaryRegion

pub mod boundaries;

use thiserror::Error;

/// Errors that can occur while reading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The input is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// The document parsed but has an unusable shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

impl From<geojson::Error> for GeoError {
    fn from(e: geojson::Error) -> Self {
        Self::GeoJson(Box::new(e))
    }
}
