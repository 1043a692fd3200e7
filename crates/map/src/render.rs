//! Leaflet HTML rendering
//!
//! Turns a [`MapDocument`] into a single self-contained HTML page. Library
//! assets come from pinned CDN URLs, so the output file works standalone in
//! any browser. Tile URLs are emitted as configuration for the map widget,
//! never fetched here.

use tunnelviz_core::GeoPoint;

use crate::document::{MapDocument, Polyline};

const LEAFLET_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css";
const LEAFLET_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js";
const MEASURE_CSS: &str = "https://unpkg.com/leaflet-measure@3.1.0/dist/leaflet-measure.css";
const MEASURE_JS: &str = "https://unpkg.com/leaflet-measure@3.1.0/dist/leaflet-measure.js";

/// Render a document as a complete HTML page.
pub fn render_html(doc: &MapDocument) -> String {
    let mut page = String::with_capacity(8 * 1024);

    page.push_str("<!doctype html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\"/>\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"/>\n");
    page.push_str(&format!("<title>{}</title>\n", html_escape(&doc.title)));
    page.push_str(&format!("<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\"/>\n"));
    page.push_str(&format!("<script src=\"{LEAFLET_JS}\"></script>\n"));
    page.push_str(&format!("<link rel=\"stylesheet\" href=\"{MEASURE_CSS}\"/>\n"));
    page.push_str(&format!("<script src=\"{MEASURE_JS}\"></script>\n"));
    page.push_str(
        "<style>\n\
         html, body, #map { height: 100%; margin: 0; }\n\
         .pin-marker {\n\
           width: 18px; height: 18px; border-radius: 50%;\n\
           border: 2px solid #fff; box-shadow: 0 0 4px rgba(0, 0, 0, 0.5);\n\
         }\n\
         </style>\n",
    );
    page.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");
    page.push_str(&script(doc));
    page.push_str("</script>\n</body>\n</html>\n");

    page
}

fn script(doc: &MapDocument) -> String {
    let mut js = String::with_capacity(4 * 1024);

    js.push_str(&format!(
        "var map = L.map('map').setView({}, {});\n",
        latlng(&doc.view.center),
        doc.view.zoom
    ));

    js.push_str("var baseLayers = {};\n");
    for (i, layer) in doc.base_layers.iter().enumerate() {
        js.push_str(&format!(
            "var base{i} = L.tileLayer({}, {{ attribution: {} }});\n",
            js_string(&layer.url_template),
            js_string(&layer.attribution)
        ));
        js.push_str(&format!("baseLayers[{}] = base{i};\n", js_string(&layer.name)));
    }
    if !doc.base_layers.is_empty() {
        js.push_str("base0.addTo(map);\n");
        js.push_str("L.control.layers(baseLayers).addTo(map);\n");
    }

    js.push_str(&format!(
        "new L.Control.Measure({{ position: {}, primaryLengthUnit: {}, primaryAreaUnit: {} }}).addTo(map);\n",
        js_string(&doc.measure.position),
        js_string(&doc.measure.primary_length_unit),
        js_string(&doc.measure.primary_area_unit)
    ));

    if let Some(alignment) = &doc.alignment {
        js.push_str(&polyline_js(alignment));
    }

    for pin in &doc.endpoints {
        js.push_str(&format!(
            "L.marker({}, {{ icon: L.divIcon({{ className: '', \
             html: '<div class=\"pin-marker\" style=\"background: {}\"></div>', \
             iconSize: [18, 18], iconAnchor: [9, 9] }}) }})\
             .bindPopup({}).addTo(map);\n",
            latlng(&pin.location),
            pin.color,
            js_string(&pin.popup)
        ));
    }

    for marker in &doc.boreholes {
        js.push_str(&format!(
            "L.circleMarker({}, {{ radius: {}, color: {color}, fill: true, \
             fillColor: {color}, fillOpacity: {} }})\
             .bindPopup({}, {{ maxWidth: 300 }}).addTo(map);\n",
            latlng(&marker.location),
            marker.radius,
            marker.fill_opacity,
            js_string(&marker.popup),
            color = js_string(&marker.color)
        ));
    }

    for connector in &doc.connectors {
        js.push_str(&polyline_js(connector));
    }

    if doc.coordinate_popup {
        js.push_str(
            "map.on('click', function (e) {\n\
               L.popup().setLatLng(e.latlng)\n\
                 .setContent('Latitude: ' + e.latlng.lat.toFixed(6) +\n\
                             '<br>Longitude: ' + e.latlng.lng.toFixed(6))\n\
                 .openOn(map);\n\
             });\n",
        );
    }

    js
}

fn polyline_js(line: &Polyline) -> String {
    let dash = match &line.stroke.dash_array {
        Some(d) => format!(", dashArray: {}", js_string(d)),
        None => String::new(),
    };
    let popup = match &line.popup {
        Some(p) => format!(".bindPopup({})", js_string(p)),
        None => String::new(),
    };
    format!(
        "L.polyline({}, {{ color: {}, weight: {}, opacity: {}{dash} }}){popup}.addTo(map);\n",
        path_js(&line.path),
        js_string(&line.stroke.color),
        line.stroke.weight,
        line.stroke.opacity
    )
}

fn latlng(p: &GeoPoint) -> String {
    format!("[{:.6}, {:.6}]", p.lat, p.lon)
}

fn path_js(path: &[GeoPoint]) -> String {
    let coords: Vec<String> = path.iter().map(latlng).collect();
    format!("[{}]", coords.join(", "))
}

/// Emit a string as a JS literal. JSON string syntax is valid JS, and the
/// serializer handles every escape we could meet in popup HTML.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Minimal HTML escaping for user-provided text interpolated into markup.
pub(crate) fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_map, BoreholeMarker};
    use tunnelviz_core::ProjectedPoint;

    fn sample_doc() -> MapDocument {
        let tunnel = vec![GeoPoint::new(42.0, 15.0), GeoPoint::new(42.009, 15.012)];
        let boreholes = vec![BoreholeMarker {
            name: "BH \"deep\" <1>".to_string(),
            projected: ProjectedPoint::new(500500.0, 4650000.0),
            geo: GeoPoint::new(42.002, 15.006),
            offset: None,
        }];
        build_map(&tunnel, &boreholes).unwrap()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("<b>"), "&lt;b&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("say \"hi\""), r#""say \"hi\"""#);
    }

    #[test]
    fn test_page_structure() {
        let html = render_html(&sample_doc());
        assert!(html.contains("<!doctype html>"));
        assert!(html.contains(LEAFLET_JS));
        assert!(html.contains(MEASURE_JS));
        assert!(html.contains("L.map('map')"));
        assert!(html.contains("L.control.layers"));
        assert!(html.contains("new L.Control.Measure"));
        assert!(html.contains("'meters'") || html.contains("\"meters\""));
    }

    #[test]
    fn test_features_are_emitted() {
        let html = render_html(&sample_doc());
        assert_eq!(html.matches("L.polyline").count(), 1);
        assert_eq!(html.matches("L.circleMarker").count(), 1);
        assert_eq!(html.matches("pin-marker").count(), 3); // CSS class + 2 pins
        assert!(html.contains("Tunnel Alignment"));
    }

    #[test]
    fn test_tile_urls_present() {
        let html = render_html(&sample_doc());
        assert!(html.contains("arcgisonline.com"));
        assert!(html.contains("tile.openstreetmap.org"));
    }

    #[test]
    fn test_click_popup_is_optional() {
        let mut doc = sample_doc();
        assert!(render_html(&doc).contains("map.on('click'"));
        doc.coordinate_popup = false;
        assert!(!render_html(&doc).contains("map.on('click'"));
    }

    #[test]
    fn test_user_text_is_escaped_in_output() {
        let html = render_html(&sample_doc());
        // The raw name must never appear unescaped in popup markup.
        assert!(!html.contains("<1>"));
        assert!(html.contains("&lt;1&gt;"));
    }
}
