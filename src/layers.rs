//! Feature-to-layer mapping.
//!
//! Turns earthquake features into circle markers (radius and color are pure
//! functions of magnitude) and plate features into stroke paths.

use serde::Serialize;
use tracing::debug;

use crate::models::{PlateFeature, QuakeFeature};
use crate::style;

/// Pinned popup timestamp format, always UTC.
const POPUP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One styled earthquake marker, ready to embed in the page.
#[derive(Debug, Clone, Serialize)]
pub struct CircleMarker {
    pub lat: f64,
    pub lng: f64,
    /// Radius in meters
    pub radius: f64,
    pub color: &'static str,
    /// Popup body HTML
    pub popup: String,
}

/// Map earthquake features to styled markers.
///
/// Features without a usable position are skipped; a missing magnitude styles
/// as the lowest bucket with radius zero.
#[must_use]
pub fn quake_markers(features: &[QuakeFeature]) -> Vec<CircleMarker> {
    features.iter().filter_map(marker_for).collect()
}

fn marker_for(feature: &QuakeFeature) -> Option<CircleMarker> {
    if !feature.has_position() {
        debug!("skipping event without coordinates");
        return None;
    }

    let magnitude = feature.properties.mag.unwrap_or(0.0);
    Some(CircleMarker {
        lat: feature.latitude(),
        lng: feature.longitude(),
        radius: style::radius_for(magnitude),
        color: style::bucket_for(magnitude).color,
        popup: popup_html(feature),
    })
}

/// Build the popup body for an event.
pub fn popup_html(feature: &QuakeFeature) -> String {
    let place = feature
        .properties
        .place
        .as_deref()
        .unwrap_or("Unknown location");

    let time = feature
        .time()
        .map(|t| format!("{} UTC", t.format(POPUP_TIME_FORMAT)))
        .unwrap_or_else(|| "unknown".to_string());

    let magnitude = feature
        .properties
        .mag
        .map(|m| m.to_string())
        .unwrap_or_else(|| "?".to_string());

    format!(
        "<h3>Location: {place}</h3><hr>\
         <p>Time: {time}</p>\
         <p>Magnitude: {magnitude}</p>"
    )
}

/// Flatten plate features to drawable paths. Styling is uniform, so no
/// per-feature attributes are read.
#[must_use]
pub fn fault_paths(features: &[PlateFeature]) -> Vec<Vec<[f64; 2]>> {
    features
        .iter()
        .flat_map(|f| f.geometry.line_paths())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointGeometry, QuakeProperties};

    fn feature(mag: Option<f64>, place: Option<&str>, time: i64, coords: Vec<f64>) -> QuakeFeature {
        QuakeFeature {
            geometry: PointGeometry {
                coordinates: coords,
            },
            properties: QuakeProperties {
                mag,
                place: place.map(String::from),
                time,
            },
        }
    }

    #[test]
    fn test_popup_contains_place_time_and_magnitude() {
        let f = feature(
            Some(3.2),
            Some("10km NE of Example"),
            1_700_000_000_000,
            vec![-120.5, 36.1],
        );
        let popup = popup_html(&f);

        assert!(popup.contains("Location: 10km NE of Example"));
        assert!(popup.contains("Time: 2023-11-14 22:13:20 UTC"));
        assert!(popup.contains("Magnitude: 3.2"));
    }

    #[test]
    fn test_popup_degrades_on_missing_fields() {
        let f = feature(None, None, 1_700_000_000_000, vec![0.0, 0.0]);
        let popup = popup_html(&f);

        assert!(popup.contains("Location: Unknown location"));
        assert!(popup.contains("Magnitude: ?"));
        assert!(!popup.contains("undefined"));
    }

    #[test]
    fn test_magnitude_six_marker_is_red_with_scaled_radius() {
        let features = [feature(Some(6.0), Some("offshore"), 0, vec![142.3, 38.5])];
        let markers = quake_markers(&features);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].color, "red");
        assert!((markers[0].radius - 120_000.0).abs() < f64::EPSILON);
        assert!((markers[0].lat - 38.5).abs() < 1e-9);
        assert!((markers[0].lng - 142.3).abs() < 1e-9);
    }

    #[test]
    fn test_feature_without_position_is_skipped() {
        let features = [
            feature(Some(2.0), Some("a"), 0, vec![]),
            feature(Some(2.0), Some("b"), 0, vec![10.0, 20.0]),
        ];
        assert_eq!(quake_markers(&features).len(), 1);
    }

    #[test]
    fn test_missing_magnitude_styles_as_lowest_bucket() {
        let features = [feature(None, Some("quiet"), 0, vec![10.0, 20.0])];
        let markers = quake_markers(&features);

        assert_eq!(markers[0].color, "lightblue");
        assert!(markers[0].radius.abs() < f64::EPSILON);
    }
}
