//! Polling daemon that feeds the tracking session.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::PositionSource;
use crate::session::SessionHandle;
use crate::status::SharedTrackingStatus;

/// Default polling interval (5 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Spawns a background task that polls `source` and feeds the session.
///
/// Fetches once immediately, then every `interval`. A successful fetch
/// updates `status` and submits a sample; a failed fetch only records the
/// error, so the session keeps showing the last position. An in-flight
/// request is abandoned when `cancellation` fires.
///
/// The task also stops when the session has shut down.
pub fn spawn_position_poller(
    source: Arc<dyn PositionSource>,
    session: SessionHandle,
    status: SharedTrackingStatus,
    interval: Duration,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!(source = source.name(), interval_ms = interval.as_millis() as u64, "Position poller started");

        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                _ = cancellation.cancelled() => break,
                result = source.fetch_position() => result,
            };

            match result {
                Ok(record) => {
                    // The session counts the rejection; the panel keeps the
                    // last in-range record.
                    match record.point().validate() {
                        Ok(()) => status.record_position(&record),
                        Err(e) => warn!(source = source.name(), error = %e, "Position out of range"),
                    }
                    if session.submit_sample(record.to_sample()).is_err() {
                        debug!("Session closed, stopping poller");
                        break;
                    }
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Position fetch failed");
                    status.record_error(e.to_string());
                }
            }
        }

        debug!("Position poller stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use parking_lot::Mutex;

    use crate::geo::GeoPoint;
    use crate::session::{spawn_session, SessionConfig};
    use crate::sink::SharedScene;
    use crate::source::{PositionRecord, SourceError, SourceFuture};

    /// Source that replays canned results, then repeats the last one.
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<PositionRecord, SourceError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<PositionRecord, SourceError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                calls: Mutex::new(0),
            }
        }
    }

    impl PositionSource for ScriptedSource {
        fn fetch_position(&self) -> SourceFuture<'_, PositionRecord> {
            *self.calls.lock() += 1;
            let mut results = self.results.lock();
            let result = if results.len() > 1 {
                results.pop_front()
            } else {
                results.front().cloned()
            };
            Box::pin(async move { result.unwrap_or(Err(SourceError::Http("empty".into()))) })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn record(lat: f64, lon: f64, timestamp: u64) -> PositionRecord {
        PositionRecord {
            latitude: lat,
            longitude: lon,
            altitude: 420.0,
            velocity: 27_600.0,
            visibility: "eclipsed".to_string(),
            timestamp,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_state() {
        let scene = SharedScene::new(4);
        let status = SharedTrackingStatus::new();
        let cancellation = CancellationToken::new();
        let (session, session_task) = spawn_session(
            SessionConfig::default(),
            Box::new(scene.clone()),
            Box::new(scene.clone()),
            status.clone(),
            cancellation.clone(),
        );

        let source = Arc::new(ScriptedSource::new(vec![
            Ok(record(10.0, 20.0, 100)),
            Err(SourceError::Status { status: 500 }),
        ]));
        let poller = spawn_position_poller(
            source.clone(),
            session,
            status.clone(),
            Duration::from_secs(5),
            cancellation.clone(),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(scene.snapshot().marker, Some(GeoPoint::new(10.0, 20.0)));
        assert_eq!(status.snapshot().latest, Some(record(10.0, 20.0, 100)));

        tokio::time::sleep(Duration::from_secs(5)).await;
        let snapshot = status.snapshot();
        assert_eq!(snapshot.last_error.as_deref(), Some("API error: 500"));
        assert_eq!(snapshot.latest, Some(record(10.0, 20.0, 100)));
        assert_eq!(snapshot.samples_accepted, 1);
        assert_eq!(scene.snapshot().marker, Some(GeoPoint::new(10.0, 20.0)));
        assert_eq!(*source.calls.lock(), 2);

        cancellation.cancel();
        poller.await.unwrap();
        session_task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_record_not_displayed() {
        let scene = SharedScene::new(4);
        let status = SharedTrackingStatus::new();
        let cancellation = CancellationToken::new();
        let (session, session_task) = spawn_session(
            SessionConfig::default(),
            Box::new(scene.clone()),
            Box::new(scene.clone()),
            status.clone(),
            cancellation.clone(),
        );

        let source = Arc::new(ScriptedSource::new(vec![
            Ok(record(10.0, 20.0, 100)),
            Ok(record(120.0, 20.0, 105)),
        ]));
        let poller = spawn_position_poller(
            source,
            session,
            status.clone(),
            Duration::from_secs(5),
            cancellation.clone(),
        );

        tokio::time::sleep(Duration::from_millis(5100)).await;
        let snapshot = status.snapshot();
        assert_eq!(snapshot.latest, Some(record(10.0, 20.0, 100)));
        assert_eq!(snapshot.samples_accepted, 1);
        assert_eq!(snapshot.samples_rejected, 1);
        assert_eq!(scene.snapshot().marker, Some(GeoPoint::new(10.0, 20.0)));

        cancellation.cancel();
        poller.await.unwrap();
        session_task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_stops_with_session() {
        let status = SharedTrackingStatus::new();
        let session_cancel = CancellationToken::new();
        let scene = SharedScene::new(4);
        let (session, session_task) = spawn_session(
            SessionConfig::default(),
            Box::new(scene.clone()),
            Box::new(scene),
            status.clone(),
            session_cancel.clone(),
        );

        let source = Arc::new(ScriptedSource::new(vec![Ok(record(1.0, 1.0, 1))]));
        let poller = spawn_position_poller(
            source,
            session,
            status,
            Duration::from_secs(5),
            CancellationToken::new(),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        session_cancel.cancel();
        session_task.await.unwrap();

        tokio::time::timeout(Duration::from_secs(30), poller)
            .await
            .expect("poller should stop once the session is gone")
            .unwrap();
    }
}
