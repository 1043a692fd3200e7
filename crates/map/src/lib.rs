//! # tunnelviz map
//!
//! Builds the map document for a project — alignment polyline, borehole
//! markers, base layers, measurement control — and renders it as a
//! self-contained Leaflet page.

pub mod builder;
pub mod document;
pub mod offset;
pub mod render;

pub use builder::{build_map, generate_map, BoreholeMarker, BoreholeOffset};
pub use document::{MapDocument, MapView, MeasureControl, TileLayer};
pub use render::render_html;
