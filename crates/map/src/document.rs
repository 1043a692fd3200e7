//! Map document model
//!
//! The in-memory artifact a generation request produces. The document only
//! describes what the map contains; turning it into something viewable is
//! the renderer's job.

use serde::{Deserialize, Serialize};
use tunnelviz_core::GeoPoint;

/// Initial view of the map: center and slippy-map zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapView {
    /// Whole-world fallback; the builder always derives a real view from
    /// the supplied points.
    fn default() -> Self {
        Self {
            center: GeoPoint::new(0.0, 0.0),
            zoom: 2,
        }
    }
}

/// A selectable base tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    /// Esri World Imagery satellite tiles.
    pub fn satellite() -> Self {
        Self {
            name: "Satellite Imagery".to_string(),
            url_template:
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
                    .to_string(),
            attribution: "Esri".to_string(),
        }
    }

    /// OpenStreetMap street tiles, for landmarks.
    pub fn openstreetmap() -> Self {
        Self {
            name: "OpenStreetMap".to_string(),
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "OpenStreetMap".to_string(),
        }
    }
}

/// The base layers every document registers, selection order preserved.
pub fn default_base_layers() -> Vec<TileLayer> {
    vec![TileLayer::satellite(), TileLayer::openstreetmap()]
}

/// Stroke styling shared by polyline features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    /// SVG dash pattern; `None` draws a solid line.
    pub dash_array: Option<String>,
}

/// An ordered line feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub path: Vec<GeoPoint>,
    pub stroke: Stroke,
    pub popup: Option<String>,
}

impl Polyline {
    /// The tunnel alignment line.
    pub fn alignment(path: Vec<GeoPoint>) -> Self {
        Self {
            path,
            stroke: Stroke {
                color: "blue".to_string(),
                weight: 3.0,
                opacity: 0.8,
                dash_array: None,
            },
            popup: Some("Tunnel Alignment".to_string()),
        }
    }

    /// A dashed borehole-to-alignment offset connector.
    pub fn connector(path: Vec<GeoPoint>, popup: impl Into<String>) -> Self {
        Self {
            path,
            stroke: Stroke {
                color: "red".to_string(),
                weight: 2.0,
                opacity: 0.6,
                dash_array: Some("5, 5".to_string()),
            },
            popup: Some(popup.into()),
        }
    }
}

/// A pin marker with a short popup label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinMarker {
    pub location: GeoPoint,
    pub color: String,
    pub popup: String,
}

/// A circle marker carrying popup content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleMarker {
    pub location: GeoPoint,
    pub radius: f64,
    pub color: String,
    pub fill_opacity: f64,
    pub popup: String,
}

impl CircleMarker {
    /// The borehole marker style.
    pub fn borehole(location: GeoPoint, popup: impl Into<String>) -> Self {
        Self {
            location,
            radius: 6.0,
            color: "purple".to_string(),
            fill_opacity: 0.8,
            popup: popup.into(),
        }
    }
}

/// The distance/area measurement control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureControl {
    pub position: String,
    pub primary_length_unit: String,
    pub primary_area_unit: String,
}

impl Default for MeasureControl {
    fn default() -> Self {
        Self {
            position: "bottomleft".to_string(),
            primary_length_unit: "meters".to_string(),
            primary_area_unit: "sqmeters".to_string(),
        }
    }
}

/// The built map: base layers, the alignment polyline, one marker per
/// borehole, and the attached controls. Single-use; built fresh on every
/// generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub title: String,
    pub view: MapView,
    pub base_layers: Vec<TileLayer>,
    /// The tunnel polyline; absent for borehole-only projects.
    pub alignment: Option<Polyline>,
    /// Start/end pins for the alignment (empty when there is none).
    pub endpoints: Vec<PinMarker>,
    /// One marker per borehole, in input order.
    pub boreholes: Vec<CircleMarker>,
    /// Dashed offset lines from each borehole to the alignment.
    pub connectors: Vec<Polyline>,
    pub measure: MeasureControl,
    /// Show a coordinate popup on map clicks.
    pub coordinate_popup: bool,
}
