//! Projected → geographic coordinate transformation.
//!
//! All projection math is delegated to proj4rs, driven by the PROJ strings
//! in the CRS registry. Pure Rust, no libproj, so the crate builds the same
//! everywhere.

use proj4rs::Proj;

use crate::crs::CrsEntry;
use crate::project::{GeoPoint, ProjectedPoint};
use crate::{Error, Result};

/// Geographic WGS84, the fixed target of every transformation.
const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Transforms projected coordinates into geographic WGS84 coordinates.
///
/// One instance is built per generation request and reused for every point
/// in it, so the tunnel path and all boreholes share a single geodetic
/// reference. Pure: identical input always yields identical output.
pub struct Transformer {
    source: Proj,
    target: Proj,
}

impl Transformer {
    /// Build a transformer from the given projected system to WGS84.
    pub fn to_wgs84(crs: &CrsEntry) -> Result<Self> {
        Ok(Self {
            source: Proj::from_proj_string(crs.proj4())?,
            target: Proj::from_proj_string(WGS84_LONGLAT)?,
        })
    }

    /// Transform a single projected point.
    ///
    /// proj4rs works in radians on the geographic side; the degree
    /// conversion happens here, at the boundary.
    pub fn transform(&self, point: ProjectedPoint) -> Result<GeoPoint> {
        if !point.is_finite() {
            return Err(Error::Validation(format!(
                "non-finite coordinate ({}, {})",
                point.x, point.y
            )));
        }

        let mut coords = (point.x, point.y, 0.0);
        proj4rs::transform::transform(&self.source, &self.target, &mut coords)?;

        Ok(GeoPoint::new(coords.1.to_degrees(), coords.0.to_degrees()))
    }

    /// Transform an ordered sequence of points.
    ///
    /// The result has the same length and order as the input; the first
    /// invalid point aborts the whole request.
    pub fn transform_path(&self, points: &[ProjectedPoint]) -> Result<Vec<GeoPoint>> {
        points.iter().map(|p| self.transform(*p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs;

    fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
        let diff = (a - b).abs();
        assert!(
            diff < tol,
            "{msg}: expected {b}, got {a}, diff {diff} exceeds tolerance {tol}"
        );
    }

    fn transformer(id: &str) -> Transformer {
        Transformer::to_wgs84(crs::lookup(id).unwrap()).unwrap()
    }

    // Reference values from the USGS inverse series (Snyder 1987, Prof.
    // Paper 1395), WGS84 ellipsoid:
    //   UTM 33N (500000, 4649776)       → (41.999998, 15.000000)
    //   UTM 33N (501000, 4650776)       → (42.009004, 15.012076)
    //   UTM 32N (506354.60, 5883817.71) → (53.103764, 9.094917)
    #[test]
    fn utm33n_known_point() {
        let t = transformer("WGS 84 / UTM zone 33N");
        let g = t.transform(ProjectedPoint::new(500000.0, 4649776.0)).unwrap();
        assert_close(g.lat, 41.999998, 1e-4, "latitude");
        assert_close(g.lon, 15.0, 1e-4, "longitude");
    }

    #[test]
    fn utm32n_known_point() {
        let t = transformer("WGS 84 / UTM zone 32N");
        let g = t
            .transform(ProjectedPoint::new(506354.60, 5883817.71))
            .unwrap();
        assert_close(g.lat, 53.103764, 1e-4, "latitude");
        assert_close(g.lon, 9.094917, 1e-4, "longitude");
    }

    // On the central meridian at the equator the inverse is exact:
    // easting 500000 is the false easting, northing 0 the equator.
    #[test]
    fn equator_central_meridian() {
        let t = transformer("WGS 84 / UTM zone 33N");
        let g = t.transform(ProjectedPoint::new(500_000.0, 0.0)).unwrap();
        assert_close(g.lat, 0.0, 1e-7, "latitude at equator");
        assert_close(g.lon, 15.0, 1e-7, "longitude at zone 33 CM");
    }

    #[test]
    fn zone30_central_meridian() {
        let t = transformer("ITRF2014 / UTM zone 30N");
        let g = t.transform(ProjectedPoint::new(500_000.0, 0.0)).unwrap();
        assert_close(g.lon, -3.0, 1e-7, "longitude at zone 30 CM");
    }

    // ETRS89 and WGS84 variants of the same zone carry a zero datum shift;
    // their outputs agree far below the transform's stated tolerance.
    #[test]
    fn etrs89_matches_wgs84_variant() {
        let etrs = transformer("ETRS89 / UTM zone 32N");
        let wgs = transformer("WGS 84 / UTM zone 32N");
        let p = ProjectedPoint::new(506400.0, 5884000.0);
        let a = etrs.transform(p).unwrap();
        let b = wgs.transform(p).unwrap();
        assert_close(a.lat, b.lat, 1e-6, "latitude");
        assert_close(a.lon, b.lon, 1e-6, "longitude");
    }

    #[test]
    fn path_preserves_length_and_order() {
        let t = transformer("WGS 84 / UTM zone 33N");
        let points: Vec<ProjectedPoint> = (0..10)
            .map(|i| ProjectedPoint::new(500000.0 + i as f64 * 100.0, 4649776.0 + i as f64 * 50.0))
            .collect();
        let geo = t.transform_path(&points).unwrap();
        assert_eq!(geo.len(), points.len());
        // Northing grows with index, so latitude must too.
        for pair in geo.windows(2) {
            assert!(pair[1].lat > pair[0].lat);
            assert!(pair[1].lon > pair[0].lon);
        }
    }

    #[test]
    fn transform_is_idempotent() {
        let t = transformer("ETRS89 / UTM zone 33N");
        let p = ProjectedPoint::new(501234.5, 4651000.25);
        let a = t.transform(p).unwrap();
        let b = t.transform(p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn output_stays_in_geographic_range() {
        for entry in crs::SUPPORTED {
            let t = Transformer::to_wgs84(entry).unwrap();
            for &(x, y) in &[
                (200_000.0, 1_000_000.0),
                (500_000.0, 4_649_776.0),
                (700_000.0, 7_000_000.0),
            ] {
                let g = t.transform(ProjectedPoint::new(x, y)).unwrap();
                assert!((-90.0..=90.0).contains(&g.lat), "lat out of range: {}", g.lat);
                assert!((-180.0..=180.0).contains(&g.lon), "lon out of range: {}", g.lon);
            }
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let t = transformer("WGS 84 / UTM zone 32N");
        let err = t.transform(ProjectedPoint::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let path = [
            ProjectedPoint::new(500000.0, 4649776.0),
            ProjectedPoint::new(f64::INFINITY, 4649776.0),
        ];
        assert!(matches!(
            t.transform_path(&path),
            Err(Error::Validation(_))
        ));
    }
}
