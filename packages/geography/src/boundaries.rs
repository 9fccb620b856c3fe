//! Region extraction from a `GeoJSON` boundary collection.
//!
//! Each feature contributes one [`BoundaryRegion`]. The region code comes
//! from the feature `id` member, falling back to an `id`, `ISO_A3` or
//! `iso_a3` property. Features with no usable code are skipped.

use std::collections::BTreeSet;

use geojson::{Feature, GeoJson, feature::Id};
use mortality_dash_geography_models::{BoundaryRegion, RegionCode};

use crate::GeoError;

/// Property names tried, in order, when a feature has no `id` member.
const CODE_PROPERTIES: &[&str] = &["id", "ISO_A3", "iso_a3"];

/// Property names tried, in order, for the display name.
const NAME_PROPERTIES: &[&str] = &["name", "NAME", "ADMIN"];

/// Parses a `GeoJSON` document into its boundary regions.
///
/// Regions keep the collection order. A code that appears on more than one
/// feature is reported once, at its first position.
///
/// # Errors
///
/// Returns [`GeoError`] if the input is not valid `GeoJSON` or is a bare
/// geometry rather than a feature or feature collection.
pub fn parse_boundary_regions(geojson_str: &str) -> Result<Vec<BoundaryRegion>, GeoError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(GeoError::Conversion {
                message: "expected a Feature or FeatureCollection, found a bare Geometry"
                    .to_string(),
            });
        }
    };

    let mut seen = BTreeSet::new();
    let mut regions = Vec::with_capacity(features.len());

    for (i, feature) in features.iter().enumerate() {
        let Some(code) = feature_code(feature) else {
            log::warn!("Boundary feature {i} has no region code, skipping");
            continue;
        };

        if !seen.insert(code.clone()) {
            log::debug!("Duplicate boundary region {code}, keeping first occurrence");
            continue;
        }

        regions.push(BoundaryRegion {
            code,
            name: feature_name(feature),
        });
    }

    log::info!("Parsed {} boundary regions", regions.len());

    Ok(regions)
}

fn feature_code(feature: &Feature) -> Option<RegionCode> {
    let from_id = feature.id.as_ref().map(|id| match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    });

    from_id
        .or_else(|| {
            CODE_PROPERTIES
                .iter()
                .find_map(|key| feature.property(key)?.as_str().map(str::to_string))
        })
        .filter(|code| !code.trim().is_empty())
        .map(RegionCode::new)
}

fn feature_name(feature: &Feature) -> Option<String> {
    NAME_PROPERTIES
        .iter()
        .find_map(|key| feature.property(key)?.as_str().map(str::to_string))
}
