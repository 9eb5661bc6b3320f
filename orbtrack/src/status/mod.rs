//! Shared tracking status for UI display and logging.
//!
//! The poller writes the latest telemetry record or fetch error; the session
//! writes the follow state and sample counters. Readers take a
//! [`TrackingStatusSnapshot`].

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::follow::FollowState;
use crate::source::PositionRecord;

/// Point-in-time copy of the tracking status.
#[derive(Debug, Clone, Default)]
pub struct TrackingStatusSnapshot {
    /// Most recent record from the position source.
    pub latest: Option<PositionRecord>,
    /// Error from the most recent failed fetch; cleared on success.
    pub last_error: Option<String>,
    /// When the last successful fetch completed.
    pub last_success: Option<Instant>,
    /// Current camera follow mode.
    pub follow: FollowState,
    /// Samples the engine accepted.
    pub samples_accepted: u64,
    /// Samples the engine rejected as malformed or out of order.
    pub samples_rejected: u64,
    /// Fetches that failed.
    pub fetch_failures: u64,
}

impl TrackingStatusSnapshot {
    /// Still waiting for the first fetch to finish either way.
    pub fn is_loading(&self) -> bool {
        self.latest.is_none() && self.last_error.is_none()
    }
}

/// Thread-safe tracking status.
#[derive(Debug, Clone, Default)]
pub struct SharedTrackingStatus {
    inner: Arc<RwLock<TrackingStatusSnapshot>>,
}

impl SharedTrackingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TrackingStatusSnapshot {
        self.inner.read().clone()
    }

    /// Record a successful fetch; clears any previous error.
    pub fn record_position(&self, record: &PositionRecord) {
        let mut status = self.inner.write();
        status.latest = Some(record.clone());
        status.last_error = None;
        status.last_success = Some(Instant::now());
    }

    /// Record a failed fetch. The previous record stays visible.
    pub fn record_error(&self, error: impl Into<String>) {
        let mut status = self.inner.write();
        status.last_error = Some(error.into());
        status.fetch_failures += 1;
    }

    pub fn set_follow_state(&self, follow: FollowState) {
        self.inner.write().follow = follow;
    }

    pub fn sample_accepted(&self) {
        self.inner.write().samples_accepted += 1;
    }

    pub fn sample_rejected(&self) {
        self.inner.write().samples_rejected += 1;
    }
}
