//! Periodic position logging daemon.
//!
//! Logs the displayed position and the latest telemetry at a fixed interval,
//! useful for checking interpolation and follow behaviour after a session.
//!
//! # Output Format
//!
//! Logs are emitted at DEBUG level with structured fields:
//! - `lat`, `lon` - Displayed (interpolated) position in decimal degrees
//! - `alt_km`, `vel_kmh` - Last reported altitude and velocity
//! - `visibility` - Last reported visibility
//! - `follow` - Camera follow mode
//! - `trail` - Trail length in points

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::sink::{SceneSnapshot, SharedScene};
use crate::status::{SharedTrackingStatus, TrackingStatusSnapshot};

/// Default logging interval (20 seconds).
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(20);

/// Spawns a background task that periodically logs the tracked position.
///
/// Stops when `cancellation` fires. Callers should check
/// `tracing::enabled!(tracing::Level::DEBUG)` first to avoid a useless task.
pub fn spawn_position_logger(
    scene: SharedScene,
    status: SharedTrackingStatus,
    cancellation: CancellationToken,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    log_position(&scene.snapshot(), &status.snapshot());
                }
                _ = cancellation.cancelled() => {
                    tracing::debug!("Position logger stopped");
                    break;
                }
            }
        }
    })
}

fn log_position(scene: &SceneSnapshot, status: &TrackingStatusSnapshot) {
    let Some(marker) = scene.marker else {
        tracing::debug!(
            error = status.last_error.as_deref().unwrap_or("-"),
            "Position update (no position yet)"
        );
        return;
    };

    match &status.latest {
        Some(record) => tracing::debug!(
            lat = format!("{:.5}", marker.latitude),
            lon = format!("{:.5}", marker.longitude),
            alt_km = format!("{:.1}", record.altitude),
            vel_kmh = format!("{:.0}", record.velocity),
            visibility = %record.visibility,
            follow = status.follow.display_status(),
            trail = scene.trail.len(),
            "Position update"
        ),
        None => tracing::debug!(
            lat = format!("{:.5}", marker.latitude),
            lon = format!("{:.5}", marker.longitude),
            follow = status.follow.display_status(),
            trail = scene.trail.len(),
            "Position update"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_logger_stops_on_cancel() {
        let cancellation = CancellationToken::new();
        let handle = spawn_position_logger(
            SharedScene::new(4),
            SharedTrackingStatus::new(),
            cancellation.clone(),
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_secs(3)).await;
        cancellation.cancel();
        handle.await.unwrap();
    }
}
