//! Error types for quakemap.
//!
//! Uses `thiserror` for library-style error definitions.

use thiserror::Error;

/// Errors that can occur while fetching or rendering map data.
#[derive(Error, Debug)]
pub enum QuakemapError {
    /// HTTP request failed (network, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Payload could not be parsed as GeoJSON
    #[error("failed to parse GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Feed returned an error status
    #[error("feed error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Response parsed but is not the expected structure
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
