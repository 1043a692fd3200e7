//! Project input model
//!
//! The host form's state, expressed as plain values. A generation request
//! receives one [`ProjectInput`] by value; the core keeps no ambient state
//! between requests.

use serde::{Deserialize, Serialize};

/// A point in the selected projected coordinate system (easting, northing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A geographic position on WGS84, in degrees. Derived, never user-entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Ordered tunnel alignment points; the order defines the polyline.
///
/// An empty path is a borehole-only project. A non-empty path needs at
/// least two points to describe a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelPath(Vec<ProjectedPoint>);

impl TunnelPath {
    pub fn new(points: Vec<ProjectedPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[ProjectedPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ProjectedPoint>> for TunnelPath {
    fn from(points: Vec<ProjectedPoint>) -> Self {
        Self(points)
    }
}

/// A named point of geotechnical interest, distinct from the alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borehole {
    pub name: String,
    #[serde(flatten)]
    pub location: ProjectedPoint,
}

impl Borehole {
    pub fn new(name: impl Into<String>, location: ProjectedPoint) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Everything one generation request runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectInput {
    /// Optional display name for the produced map.
    #[serde(default)]
    pub name: Option<String>,
    /// Identifier resolved against the CRS registry (label or `epsg:NNNNN`).
    pub coordinate_system: String,
    /// Tunnel alignment in projected coordinates.
    #[serde(default)]
    pub tunnel: TunnelPath,
    /// Boreholes in projected coordinates; insertion order is preserved.
    #[serde(default)]
    pub boreholes: Vec<Borehole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_point_finite() {
        assert!(ProjectedPoint::new(500000.0, 4649776.0).is_finite());
        assert!(!ProjectedPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!ProjectedPoint::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_project_input_from_toml() {
        let src = r#"
            name = "Harbour crossing"
            coordinate-system = "ETRS89 / UTM zone 32N"

            [[tunnel]]
            x = 506354.60
            y = 5883817.71

            [[tunnel]]
            x = 506475.24
            y = 5885294.25

            [[boreholes]]
            name = "BH1"
            x = 506480.60
            y = 5885291.28
        "#;
        let input: ProjectInput = toml::from_str(src).unwrap();
        assert_eq!(input.name.as_deref(), Some("Harbour crossing"));
        assert_eq!(input.coordinate_system, "ETRS89 / UTM zone 32N");
        assert_eq!(input.tunnel.len(), 2);
        assert_eq!(input.tunnel.points()[0].x, 506354.60);
        assert_eq!(input.boreholes.len(), 1);
        assert_eq!(input.boreholes[0].name, "BH1");
        assert_eq!(input.boreholes[0].location.y, 5885291.28);
    }

    #[test]
    fn test_project_input_defaults() {
        let input: ProjectInput =
            toml::from_str(r#"coordinate-system = "epsg:32633""#).unwrap();
        assert!(input.name.is_none());
        assert!(input.tunnel.is_empty());
        assert!(input.boreholes.is_empty());
    }
}
