//! Data models for the two GeoJSON feeds.
//!
//! The earthquake feed is the USGS summary format; the plate-boundary feed is
//! the PB2002 dataset, which carries polygon geometries and no metadata.
//! Only the fields the map consumes are modeled; serde skips the rest.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::errors::QuakemapError;

/// Top-level GeoJSON response from either feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection<F> {
    /// Always "FeatureCollection"
    #[serde(rename = "type")]
    pub type_: String,

    /// Feed metadata; the USGS feeds supply it, the plates feed does not
    #[serde(default)]
    pub metadata: Option<Metadata>,

    /// Features from the feed
    pub features: Vec<F>,
}

impl<F> FeatureCollection<F> {
    /// Validate the response structure.
    pub fn validate(&self) -> Result<(), QuakemapError> {
        if self.type_ != "FeatureCollection" {
            return Err(QuakemapError::InvalidResponse(format!(
                "expected type 'FeatureCollection', got '{}'",
                self.type_
            )));
        }
        Ok(())
    }
}

/// Metadata block on USGS feed responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Human-readable title
    pub title: String,

    /// Number of events in response
    pub count: usize,
}

/// A single earthquake event.
#[derive(Debug, Clone, Deserialize)]
pub struct QuakeFeature {
    /// Epicenter location
    pub geometry: PointGeometry,

    /// Event properties
    pub properties: QuakeProperties,
}

impl QuakeFeature {
    /// Get the event time as a `DateTime<Utc>`.
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.properties.time).single()
    }

    /// Get longitude (degrees).
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.geometry.coordinates.first().copied().unwrap_or(0.0)
    }

    /// Get latitude (degrees).
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.geometry.coordinates.get(1).copied().unwrap_or(0.0)
    }

    /// Whether the geometry carries a usable lon/lat pair.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.geometry.coordinates.len() >= 2
    }
}

/// Point geometry for an earthquake event.
#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    /// Coordinates: [longitude, latitude, depth_km]
    pub coordinates: Vec<f64>,
}

/// The subset of USGS event properties the map consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct QuakeProperties {
    /// Magnitude value
    pub mag: Option<f64>,

    /// Human-readable place description
    pub place: Option<String>,

    /// Event time (ms since epoch)
    pub time: i64,
}

/// A plate-boundary feature. Only the geometry is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct PlateFeature {
    /// Boundary geometry
    pub geometry: PlateGeometry,
}

/// Line-like geometry from the plates feed.
///
/// PB2002 ships polygons, but the overlay draws strokes only, so every
/// variant flattens to a list of lat/lon paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum PlateGeometry {
    LineString(Vec<Vec<f64>>),
    MultiLineString(Vec<Vec<Vec<f64>>>),
    Polygon(Vec<Vec<Vec<f64>>>),
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

impl PlateGeometry {
    /// Flatten to drawable paths, converting GeoJSON [lon, lat] order to the
    /// [lat, lon] order the map expects. Malformed coordinate pairs are
    /// dropped.
    #[must_use]
    pub fn line_paths(&self) -> Vec<Vec<[f64; 2]>> {
        fn path(line: &[Vec<f64>]) -> Vec<[f64; 2]> {
            line.iter()
                .filter(|c| c.len() >= 2)
                .map(|c| [c[1], c[0]])
                .collect()
        }

        match self {
            Self::LineString(line) => vec![path(line)],
            Self::MultiLineString(lines) | Self::Polygon(lines) => {
                lines.iter().map(|l| path(l)).collect()
            }
            Self::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter().map(|l| path(l)))
                .collect(),
        }
    }
}
