//! HTML page rendering.
//!
//! Emits a single self-contained page: Leaflet from its CDN, the three Mapbox
//! base layers, both overlays with their data baked in as JSON, a permanently
//! expanded layer control, and the legend. Placeholder substitution keeps the
//! embedded JavaScript readable.

use serde::Serialize;

use crate::errors::QuakemapError;
use crate::map::{self, MapDocument};
use crate::style;

/// Config values handed to the page script.
#[derive(Serialize)]
struct PageConfig<'a> {
    token: &'a str,
    center: [f64; 2],
    zoom: u8,
    #[serde(rename = "faultColor")]
    fault_color: &'static str,
}

/// Render the map document as a complete HTML page.
///
/// # Errors
///
/// Returns an error if the embedded layer data cannot be serialized.
pub fn render_page(doc: &MapDocument) -> Result<String, QuakemapError> {
    let config = serde_json::to_string(&PageConfig {
        token: &doc.config.mapbox_token,
        center: doc.config.center,
        zoom: doc.config.zoom,
        fault_color: style::FAULT_COLOR,
    })?;
    let bases = serde_json::to_string(&map::base_layers())?;
    let quakes = serde_json::to_string(&doc.markers)?;
    let faults = serde_json::to_string(&doc.fault_paths)?;
    let legend = serde_json::to_string(&style::BUCKETS)?;

    Ok(PAGE_TEMPLATE
        .replace("__CONFIG__", &config)
        .replace("__BASE_LAYERS__", &bases)
        .replace("__QUAKES__", &quakes)
        .replace("__FAULTS__", &faults)
        .replace("__LEGEND__", &legend))
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Earthquake Map</title>

    <!-- Leaflet -->
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>

    <style>
        html, body, #map { height: 100%; margin: 0; }
        .legend {
            background: #fff;
            padding: 8px 12px;
            border-radius: 4px;
            box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3);
            font: 14px/20px sans-serif;
        }
        .legend i {
            display: inline-block;
            width: 14px;
            height: 14px;
            margin-right: 6px;
            vertical-align: middle;
        }
    </style>
</head>
<body>
    <div id="map"></div>

    <script>
        var config = __CONFIG__;
        var baseLayers = __BASE_LAYERS__;
        var quakes = __QUAKES__;
        var faultPaths = __FAULTS__;
        var legendEntries = __LEGEND__;

        var tileUrl = "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";
        var bases = {};
        var activeLayers = [];
        baseLayers.forEach(function (base, i) {
            var tiles = L.tileLayer(tileUrl, {
                attribution: base.attribution,
                maxZoom: 18,
                id: base.styleId,
                accessToken: config.token
            });
            bases[base.name] = tiles;
            if (i === 0) {
                activeLayers.push(tiles);
            }
        });

        var earthquakes = L.layerGroup(quakes.map(function (q) {
            return L.circle([q.lat, q.lng], {
                radius: q.radius,
                color: q.color,
                fillOpacity: 1
            }).bindPopup(q.popup);
        }));

        var faultLines = L.layerGroup(faultPaths.map(function (path) {
            return L.polyline(path, { color: config.faultColor, fillOpacity: 0 });
        }));

        activeLayers.push(earthquakes, faultLines);

        var map = L.map("map", {
            center: config.center,
            zoom: config.zoom,
            layers: activeLayers
        });

        L.control.layers(bases, {
            Earthquakes: earthquakes,
            Faultlines: faultLines
        }, { collapsed: false }).addTo(map);

        var legend = L.control({ position: "bottomright" });
        legend.onAdd = function () {
            var div = L.DomUtil.create("div", "legend");
            legendEntries.forEach(function (entry) {
                div.innerHTML +=
                    '<i style="background:' + entry.color + '"></i> ' + entry.label + '<br>';
            });
            return div;
        };
        legend.addTo(map);
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::CircleMarker;
    use crate::map::MapConfig;

    fn document() -> MapDocument {
        MapDocument {
            config: MapConfig::new("pk.test-token"),
            markers: vec![CircleMarker {
                lat: 36.1,
                lng: -120.5,
                radius: 120_000.0,
                color: "red",
                popup: "<h3>Location: somewhere</h3>".to_string(),
            }],
            fault_paths: vec![vec![[35.0, -120.0], [36.0, -121.0]]],
        }
    }

    #[test]
    fn test_page_embeds_config_and_data() {
        let html = render_page(&document()).expect("render");

        assert!(html.contains("pk.test-token"));
        assert!(html.contains("[37.09,-95.71]"));
        assert!(html.contains("\"color\":\"red\""));
        assert!(html.contains("mapbox/satellite-v9"));
        assert!(html.contains("[[35.0,-120.0],[36.0,-121.0]]"));
        // No placeholder left behind
        assert!(!html.contains("__CONFIG__"));
        assert!(!html.contains("__QUAKES__"));
    }

    #[test]
    fn test_page_has_legend_entries_in_order() {
        let html = render_page(&document()).expect("render");

        let labels = ["0\u{2013}1", "1\u{2013}2", "2\u{2013}3", "3\u{2013}4", "4\u{2013}5", "5+"];
        let mut last = 0;
        for label in labels {
            let pos = html.find(label).unwrap_or_else(|| panic!("missing label {label}"));
            assert!(pos > last, "label {label} out of order");
            last = pos;
        }
    }

    #[test]
    fn test_empty_overlays_still_render() {
        let doc = MapDocument {
            config: MapConfig::new("tok"),
            markers: Vec::new(),
            fault_paths: Vec::new(),
        };
        let html = render_page(&doc).expect("render");

        assert!(html.contains("var quakes = [];"));
        assert!(html.contains("var faultPaths = [];"));
        assert!(html.contains("L.control.layers"));
    }
}
