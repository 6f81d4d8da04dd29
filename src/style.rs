//! Magnitude-based styling.
//!
//! One shared bucket table drives both the circle markers and the legend, so
//! the two can never disagree on colors.

use serde::Serialize;

/// Meters of circle radius per unit of magnitude.
const RADIUS_SCALE: f64 = 20_000.0;

/// Stroke color for tectonic-plate boundary lines.
pub const FAULT_COLOR: &str = "purple";

/// One magnitude range with its marker color and legend label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MagnitudeBucket {
    /// Lower bound of the range; a magnitude falls in the highest bucket
    /// whose floor it strictly exceeds.
    pub floor: f64,
    pub color: &'static str,
    pub label: &'static str,
}

/// The six magnitude buckets, in legend order.
pub static BUCKETS: [MagnitudeBucket; 6] = [
    MagnitudeBucket {
        floor: 0.0,
        color: "lightblue",
        label: "0\u{2013}1",
    },
    MagnitudeBucket {
        floor: 1.0,
        color: "green",
        label: "1\u{2013}2",
    },
    MagnitudeBucket {
        floor: 2.0,
        color: "yellow",
        label: "2\u{2013}3",
    },
    MagnitudeBucket {
        floor: 3.0,
        color: "orange",
        label: "3\u{2013}4",
    },
    MagnitudeBucket {
        floor: 4.0,
        color: "darkorange",
        label: "4\u{2013}5",
    },
    MagnitudeBucket {
        floor: 5.0,
        color: "red",
        label: "5+",
    },
];

/// Find the bucket for a magnitude.
///
/// Thresholds are strict greater-than, checked from the highest bucket down:
/// exactly 4.0 is "orange", not "darkorange". Magnitudes at or below zero
/// (including malformed negative input) land in the lowest bucket.
#[must_use]
pub fn bucket_for(magnitude: f64) -> &'static MagnitudeBucket {
    BUCKETS
        .iter()
        .rev()
        .find(|b| magnitude > b.floor)
        .unwrap_or(&BUCKETS[0])
}

/// Circle radius in meters for a magnitude: a plain linear scale.
#[must_use]
pub fn radius_for(magnitude: f64) -> f64 {
    magnitude * RADIUS_SCALE
}
