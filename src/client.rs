//! HTTP client for the two GeoJSON feeds.
//!
//! Async reqwest with rustls. Each fetch is a single attempt: status is
//! checked before the body is parsed, and failures surface as typed errors so
//! the composer can degrade instead of aborting.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::QuakemapError;
use crate::models::{FeatureCollection, PlateFeature, QuakeFeature};

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for feed requests.
const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// USGS base URL for earthquake summary feeds.
const USGS_BASE_URL: &str = "https://earthquake.usgs.gov";

/// Tectonic plate boundaries (PB2002 dataset).
pub const DEFAULT_PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_plates.json";

/// Minimum-magnitude band of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeBand {
    All,
    M1,
    M25,
    M45,
    Significant,
}

impl MagnitudeBand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::M1 => "1.0",
            Self::M25 => "2.5",
            Self::M45 => "4.5",
            Self::Significant => "significant",
        }
    }
}

/// Time window of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
}

impl TimeWindow {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// A USGS summary feed, e.g. `all_week` or `2.5_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSpec {
    pub band: MagnitudeBand,
    pub window: TimeWindow,
}

impl FeedSpec {
    /// The feed the original map used.
    pub const ALL_WEEK: Self = Self {
        band: MagnitudeBand::All,
        window: TimeWindow::Week,
    };
}

impl fmt::Display for FeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.band.as_str(), self.window.as_str())
    }
}

impl std::str::FromStr for FeedSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let (band, window) = lower
            .rsplit_once('_')
            .ok_or_else(|| format!("feed must look like 'all_week' or '2.5_day', got '{s}'"))?;

        let band = match band {
            "all" => MagnitudeBand::All,
            "1.0" => MagnitudeBand::M1,
            "2.5" => MagnitudeBand::M25,
            "4.5" => MagnitudeBand::M45,
            "significant" => MagnitudeBand::Significant,
            _ => return Err(format!("unknown magnitude band: {band}")),
        };
        let window = match window {
            "hour" => TimeWindow::Hour,
            "day" => TimeWindow::Day,
            "week" => TimeWindow::Week,
            "month" => TimeWindow::Month,
            _ => return Err(format!("unknown time window: {window}")),
        };

        Ok(Self { band, window })
    }
}

/// Client for the earthquake and plate-boundary feeds.
pub struct FeedClient {
    client: Client,
    base_url: String,
    plates_url: String,
}

impl FeedClient {
    /// Create a new feed client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, QuakemapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: USGS_BASE_URL.to_string(),
            plates_url: DEFAULT_PLATES_URL.to_string(),
        })
    }

    /// Override the USGS base URL (tests, mirrors).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the plate-boundary feed URL.
    #[must_use]
    pub fn with_plates_url(mut self, url: impl Into<String>) -> Self {
        self.plates_url = url.into();
        self
    }

    /// Fetch an earthquake summary feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the payload is not a feature collection.
    pub async fn fetch_quakes(
        &self,
        feed: FeedSpec,
    ) -> Result<FeatureCollection<QuakeFeature>, QuakemapError> {
        let url = format!(
            "{}/earthquakes/feed/v1.0/summary/{feed}.geojson",
            self.base_url
        );

        let collection: FeatureCollection<QuakeFeature> = self.get_json(&url).await?;
        collection.validate()?;

        if let Some(meta) = &collection.metadata {
            debug!("fetched '{}': {} events", meta.title, meta.count);
        }
        Ok(collection)
    }

    /// Fetch the plate-boundary feed.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_quakes`].
    pub async fn fetch_plates(&self) -> Result<FeatureCollection<PlateFeature>, QuakemapError> {
        let collection: FeatureCollection<PlateFeature> =
            self.get_json(&self.plates_url).await?;
        collection.validate()?;

        debug!("fetched {} plate boundaries", collection.features.len());
        Ok(collection)
    }

    /// GET a URL and parse the body as JSON.
    ///
    /// Network failures map to `Fetch`, bad statuses to `Api`, and malformed
    /// bodies to `Parse`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, QuakemapError> {
        debug!("fetching {url}");

        let response = self.client.get(url).send().await?;

        // Check status before parsing
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(QuakemapError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    #[test]
    fn test_feed_spec_round_trip() {
        for s in ["all_week", "2.5_day", "significant_month", "1.0_hour"] {
            let spec: FeedSpec = s.parse().expect("failed to parse");
            assert_eq!(spec.to_string(), s);
        }
        assert_eq!(FeedSpec::ALL_WEEK.to_string(), "all_week");
    }

    #[test]
    fn test_feed_spec_rejects_garbage() {
        assert!("allweek".parse::<FeedSpec>().is_err());
        assert!("9.9_week".parse::<FeedSpec>().is_err());
        assert!("all_decade".parse::<FeedSpec>().is_err());
    }

    #[tokio::test]
    async fn test_fetch_quakes_parses_feed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/earthquakes/feed/v1.0/summary/all_week.geojson");
            then.status(200).json_body(serde_json::json!({
                "type": "FeatureCollection",
                "metadata": { "title": "test feed", "count": 1 },
                "features": [{
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-120.5, 36.1, 8.2] },
                    "properties": { "mag": 6.0, "place": "somewhere", "time": 1700000000000i64 }
                }]
            }));
        });

        let client = FeedClient::new()
            .expect("client")
            .with_base_url(server.base_url());

        let feed = client.fetch_quakes(FeedSpec::ALL_WEEK).await.expect("fetch");
        assert_eq!(feed.features.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_quakes_surfaces_http_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/earthquakes/feed/v1.0/summary/all_week.geojson");
            then.status(503).body("unavailable");
        });

        let client = FeedClient::new()
            .expect("client")
            .with_base_url(server.base_url());

        let err = client
            .fetch_quakes(FeedSpec::ALL_WEEK)
            .await
            .expect_err("should fail");
        match err {
            QuakemapError::Api { status, .. } => assert_eq!(status, 503),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_plates_surfaces_parse_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/plates.json");
            then.status(200).body("not json at all");
        });

        let client = FeedClient::new()
            .expect("client")
            .with_plates_url(server.url("/plates.json"));

        let err = client.fetch_plates().await.expect_err("should fail");
        assert!(matches!(err, QuakemapError::Parse(_)));
    }
}
