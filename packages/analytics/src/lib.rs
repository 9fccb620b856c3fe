#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the mortality dashboard.
//!
//! The loaded records live in a [`store::RecordStore`]. For a given
//! [`FilterState`](mortality_dash_analytics_models::FilterState) the
//! records are restricted by [`filter`], reduced with [`aggregate`], and
//! shaped into views by the builders in [`views`]. Nothing here mutates the
//! store or keeps state between builds.

pub mod aggregate;
pub mod filter;
pub mod palette;
pub mod store;
pub mod views;

pub use store::RecordStore;
pub use views::{ViewEngine, ViewOptions};
