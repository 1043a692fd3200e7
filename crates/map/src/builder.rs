//! Map construction
//!
//! The "generate" action: validate the project input, resolve its CRS,
//! transform everything with one shared transformer, then assemble the
//! [`MapDocument`]. Either a complete document comes back or an error;
//! nothing here produces partial state.

use tunnelviz_core::{crs, Error, GeoPoint, ProjectInput, ProjectedPoint, Result, Transformer};

use crate::document::{
    default_base_layers, CircleMarker, MapDocument, MapView, MeasureControl, PinMarker, Polyline,
};
use crate::offset;
use crate::render::html_escape;

const DEFAULT_TITLE: &str = "Tunnel and Borehole Visualization";

/// Zoom used when the supplied points do not span a measurable extent.
const POINT_ZOOM: u8 = 13;

/// A transformed borehole, ready for plotting.
///
/// Carries the original projected location alongside the derived geographic
/// one: the popup shows both, since the user thinks in the projected system.
#[derive(Debug, Clone, PartialEq)]
pub struct BoreholeMarker {
    pub name: String,
    pub projected: ProjectedPoint,
    pub geo: GeoPoint,
    pub offset: Option<BoreholeOffset>,
}

/// Offset of a borehole to the alignment, with the nearest alignment point
/// already transformed for drawing the connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoreholeOffset {
    /// Distance in projected metres.
    pub distance: f64,
    pub nearest: GeoPoint,
}

/// Run the full generation pipeline for one project input.
pub fn generate_map(input: &ProjectInput) -> Result<MapDocument> {
    if input.tunnel.len() == 1 {
        return Err(Error::Validation(
            "a tunnel alignment needs at least two points".to_string(),
        ));
    }

    let crs = crs::lookup(&input.coordinate_system)?;
    let transformer = Transformer::to_wgs84(crs)?;

    let tunnel = transformer.transform_path(input.tunnel.points())?;

    let mut boreholes = Vec::with_capacity(input.boreholes.len());
    for bh in &input.boreholes {
        let geo = transformer.transform(bh.location)?;
        let offset = match offset::alignment_offset(input.tunnel.points(), bh.location) {
            Some(o) => Some(BoreholeOffset {
                distance: o.distance,
                nearest: transformer.transform(o.nearest)?,
            }),
            None => None,
        };
        boreholes.push(BoreholeMarker {
            name: bh.name.clone(),
            projected: bh.location,
            geo,
            offset,
        });
    }

    let mut doc = build_map(&tunnel, &boreholes)?;
    if let Some(name) = &input.name {
        doc.title = name.clone();
    }
    Ok(doc)
}

/// Assemble a document from already-transformed features.
///
/// `tunnel` is the alignment in input order; `boreholes` keep their
/// insertion order. Zero points overall is an error rather than an empty
/// map.
pub fn build_map(tunnel: &[GeoPoint], boreholes: &[BoreholeMarker]) -> Result<MapDocument> {
    let all: Vec<GeoPoint> = tunnel
        .iter()
        .copied()
        .chain(boreholes.iter().map(|b| b.geo))
        .collect();
    if all.is_empty() {
        return Err(Error::EmptyInput);
    }

    let alignment = if tunnel.len() >= 2 {
        Some(Polyline::alignment(tunnel.to_vec()))
    } else {
        None
    };

    let mut endpoints = Vec::new();
    if tunnel.len() >= 2 {
        endpoints.push(PinMarker {
            location: tunnel[0],
            color: "green".to_string(),
            popup: "Tunnel Start".to_string(),
        });
        endpoints.push(PinMarker {
            location: tunnel[tunnel.len() - 1],
            color: "red".to_string(),
            popup: "Tunnel End".to_string(),
        });
    }

    let mut markers = Vec::with_capacity(boreholes.len());
    let mut connectors = Vec::new();
    for bh in boreholes {
        markers.push(CircleMarker::borehole(bh.geo, borehole_popup(bh)));
        if let Some(off) = bh.offset {
            connectors.push(Polyline::connector(
                vec![bh.geo, off.nearest],
                format!("Distance: {:.2} m", off.distance),
            ));
        }
    }

    Ok(MapDocument {
        title: DEFAULT_TITLE.to_string(),
        view: frame(&all),
        base_layers: default_base_layers(),
        alignment,
        endpoints,
        boreholes: markers,
        connectors,
        measure: MeasureControl::default(),
        coordinate_popup: true,
    })
}

/// Popup for a borehole marker: name, the coordinates as entered, the
/// derived geographic position, and the alignment offset when known.
fn borehole_popup(bh: &BoreholeMarker) -> String {
    let mut popup = format!(
        "<b>{}</b><br>Input Coordinates:<br>X: {:.2}<br>Y: {:.2}<br>\
         Lat/Lon Coordinates:<br>Lat: {:.6}<br>Lon: {:.6}",
        html_escape(&bh.name),
        bh.projected.x,
        bh.projected.y,
        bh.geo.lat,
        bh.geo.lon
    );
    if let Some(off) = bh.offset {
        popup.push_str(&format!("<br>Distance to Tunnel: {:.2} m", off.distance));
    }
    popup
}

/// Center/zoom framing every supplied point.
///
/// Bounding-box midpoint for the center; zoom from the padded span of the
/// box (latitude-corrected in longitude), clamped to sane slippy-map
/// levels. A degenerate span falls back to a fixed site-scale zoom.
fn frame(points: &[GeoPoint]) -> MapView {
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lon = f64::MAX;
    let mut max_lon = f64::MIN;
    for p in points {
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
        min_lon = min_lon.min(p.lon);
        max_lon = max_lon.max(p.lon);
    }

    let center = GeoPoint::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0);

    let lat_span = max_lat - min_lat;
    let lon_span = (max_lon - min_lon) * center.lat.to_radians().cos().abs();
    let span = lat_span.max(lon_span) * 1.5;

    let zoom = if span > 0.0 {
        ((360.0 / span).log2().floor() as i64).clamp(2, 17) as u8
    } else {
        POINT_ZOOM
    };

    MapView { center, zoom }
}
