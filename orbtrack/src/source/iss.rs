//! ISS position from the wheretheiss.at satellite API.

use serde::Deserialize;

use super::http::get_json;
use super::{SourceError, SourceFuture};
use crate::animation::Sample;
use crate::geo::GeoPoint;

/// NORAD catalogue endpoint for the ISS (25544).
pub const DEFAULT_POSITION_URL: &str = "https://api.wheretheiss.at/v1/satellites/25544";

/// One position report.
///
/// Units follow the API defaults: altitude in km, velocity in km/h,
/// timestamp in seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub velocity: f64,
    /// "daylight", "eclipsed" or "visible".
    pub visibility: String,
    pub timestamp: u64,
}

impl PositionRecord {
    /// Position, unvalidated; the driver rejects bad coordinates.
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Engine sample ordered by the report timestamp.
    pub fn to_sample(&self) -> Sample {
        Sample::new(self.point(), self.timestamp)
    }
}

/// Something that can report the tracked object's position.
pub trait PositionSource: Send + Sync {
    /// Fetch the current position.
    fn fetch_position(&self) -> SourceFuture<'_, PositionRecord>;

    /// Human-readable source name for logs.
    fn name(&self) -> &str;
}

/// reqwest client for wheretheiss.at.
pub struct WhereTheIssSource {
    client: reqwest::Client,
    url: String,
}

impl WhereTheIssSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PositionSource for WhereTheIssSource {
    fn fetch_position(&self) -> SourceFuture<'_, PositionRecord> {
        Box::pin(async move {
            let record: PositionRecord = get_json(&self.client, &self.url).await?;
            Ok(record)
        })
    }

    fn name(&self) -> &str {
        "wheretheiss.at"
    }
}

/// Parse a raw API body; exposed for fixtures.
pub fn parse_position(body: &[u8]) -> Result<PositionRecord, SourceError> {
    super::http::decode_json(body)
}
