//! # tunnelviz core
//!
//! Data model, coordinate-system registry and the projected→geographic
//! transformer shared by the map builder and the CLI.
//!
//! This crate provides:
//! - `ProjectInput` and friends: the form values a generation request runs on
//! - `crs`: the fixed registry of supported UTM systems
//! - `Transformer`: projected → WGS84 conversion via proj4rs

pub mod crs;
pub mod error;
pub mod project;
pub mod transform;

pub use crs::CrsEntry;
pub use error::{Error, Result};
pub use project::{Borehole, GeoPoint, ProjectInput, ProjectedPoint, TunnelPath};
pub use transform::Transformer;
