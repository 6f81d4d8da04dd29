//! Map composition.
//!
//! Runs the two feed fetches concurrently and assembles the map document:
//! base tile layers, earthquake markers, fault-line paths. A failed feed
//! degrades to an empty overlay instead of failing the page.

use serde::Serialize;
use tracing::warn;

use crate::client::{FeedClient, FeedSpec};
use crate::layers::{self, CircleMarker};

/// Default map center (continental US).
pub const DEFAULT_CENTER: [f64; 2] = [37.09, -95.71];

/// Default zoom level.
pub const DEFAULT_ZOOM: u8 = 5;

const MAPBOX_ATTRIBUTION: &str = "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, \
     <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, \
     Imagery \u{a9} <a href=\"https://www.mapbox.com/\">Mapbox</a>";

/// Map configuration, passed in explicitly rather than read from globals.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Mapbox access token for the base tile layers
    pub mapbox_token: String,
    pub center: [f64; 2],
    pub zoom: u8,
}

impl MapConfig {
    /// Config with the default center and zoom.
    #[must_use]
    pub fn new(mapbox_token: impl Into<String>) -> Self {
        Self {
            mapbox_token: mapbox_token.into(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// A selectable base tile layer.
#[derive(Debug, Clone, Serialize)]
pub struct BaseLayer {
    pub name: &'static str,
    #[serde(rename = "styleId")]
    pub style_id: &'static str,
    pub attribution: &'static str,
}

/// The three Mapbox base layers, first one active by default.
#[must_use]
pub fn base_layers() -> [BaseLayer; 3] {
    [
        BaseLayer {
            name: "Satellite Map",
            style_id: "mapbox/satellite-v9",
            attribution: MAPBOX_ATTRIBUTION,
        },
        BaseLayer {
            name: "Gray Map",
            style_id: "mapbox/light-v10",
            attribution: MAPBOX_ATTRIBUTION,
        },
        BaseLayer {
            name: "Outdoors Map",
            style_id: "mapbox/outdoors-v11",
            attribution: MAPBOX_ATTRIBUTION,
        },
    ]
}

/// Everything the page renderer needs.
#[derive(Debug, Clone)]
pub struct MapDocument {
    pub config: MapConfig,
    pub markers: Vec<CircleMarker>,
    pub fault_paths: Vec<Vec<[f64; 2]>>,
}

/// Fetch both feeds concurrently and compose the map document.
///
/// The two fetches are independent and unordered. Either feed failing leaves
/// its overlay empty; the map still renders with base layers and whatever
/// data arrived.
pub async fn compose(client: &FeedClient, feed: FeedSpec, config: MapConfig) -> MapDocument {
    let (quakes, plates) = tokio::join!(client.fetch_quakes(feed), client.fetch_plates());

    let markers = match quakes {
        Ok(collection) => layers::quake_markers(&collection.features),
        Err(e) => {
            warn!("earthquake feed unavailable, rendering without markers: {e}");
            Vec::new()
        }
    };

    let fault_paths = match plates {
        Ok(collection) => layers::fault_paths(&collection.features),
        Err(e) => {
            warn!("plate-boundary feed unavailable, rendering without fault lines: {e}");
            Vec::new()
        }
    };

    MapDocument {
        config,
        markers,
        fault_paths,
    }
}
