//! Borehole offset to the tunnel alignment.
//!
//! Offsets are measured in the projected CRS, where coordinates are metres;
//! measuring on the geographic output would mix degrees into a length.

use geo::{Closest, ClosestPoint, LineString, Point};
use tunnelviz_core::ProjectedPoint;

/// Perpendicular offset from a borehole to the alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentOffset {
    /// Straight-line distance in projected units (metres).
    pub distance: f64,
    /// Nearest point on the alignment, in projected coordinates.
    pub nearest: ProjectedPoint,
}

/// Offset of `point` to the polyline through `path`.
///
/// Returns `None` when the path has fewer than two points (no line to
/// measure against).
pub fn alignment_offset(path: &[ProjectedPoint], point: ProjectedPoint) -> Option<AlignmentOffset> {
    if path.len() < 2 {
        return None;
    }

    let line = LineString::from(path.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>());
    let target = Point::new(point.x, point.y);

    let nearest = match line.closest_point(&target) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p,
        Closest::Indeterminate => return None,
    };

    let dx = nearest.x() - point.x;
    let dy = nearest.y() - point.y;
    Some(AlignmentOffset {
        distance: (dx * dx + dy * dy).sqrt(),
        nearest: ProjectedPoint::new(nearest.x(), nearest.y()),
    })
}
