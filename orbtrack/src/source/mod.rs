//! Remote data sources: the object's position and the crew roster.
//!
//! Both are thin HTTP clients behind dyn-compatible traits so the poller and
//! the CLI can be tested against in-process fakes.

mod crew;
mod http;
mod iss;
mod poller;

pub use crew::{iss_crew, CrewMember, CrewSource, OpenNotifyCrewSource, DEFAULT_CREW_URL};
pub use http::{build_client, DEFAULT_REQUEST_TIMEOUT};
pub use iss::{
    parse_position, PositionRecord, PositionSource, WhereTheIssSource, DEFAULT_POSITION_URL,
};
pub use poller::{spawn_position_poller, DEFAULT_POLL_INTERVAL};

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future returned by source traits.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Errors fetching remote data. All are transient; the next poll retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Connection, TLS or timeout failure.
    #[error("Request failed: {0}")]
    Http(String),

    /// Server answered with a non-2xx status.
    #[error("API error: {status}")]
    Status { status: u16 },

    /// Body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
