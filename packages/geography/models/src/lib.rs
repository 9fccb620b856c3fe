#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region code and boundary types.
//!
//! A [`RegionCode`] identifies one boundary polygon in the geometry
//! collection. Tabular records never carry region codes directly; they carry
//! free-text country names which are mapped through
//! [`countries::CountryCodeResolver`].

pub mod countries;

use serde::{Deserialize, Serialize};

/// Short geographic-boundary identifier (e.g. `"MYS"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    /// Wraps a raw code. Surrounding whitespace is trimmed and the code is
    /// upper-cased so lookups are insensitive to source formatting.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named region from the boundary collection.
///
/// Only the identifier and display name are kept; the polygon itself is
/// never needed by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRegion {
    /// Region code of the polygon.
    pub code: RegionCode,
    /// Display name from the boundary properties, if present.
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_code_is_normalized() {
        assert_eq!(RegionCode::new(" mys ").as_str(), "MYS");
        assert_eq!(RegionCode::new("MYS"), RegionCode::new("mys"));
    }

    #[test]
    fn region_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RegionCode::new("SGP")).unwrap();
        assert_eq!(json, "\"SGP\"");
    }
}
