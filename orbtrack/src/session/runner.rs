//! Session state and its event loop task.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::scheduler::TokioTickScheduler;
use super::SessionCommand;
use crate::animation::{
    DriverConfig, InterpolationDriver, Sample, SampleOutcome, TickOutcome, TickScheduler,
};
use crate::follow::{FollowController, FollowState, FollowTransition};
use crate::sink::{CameraSink, PositionSink, Sinks};
use crate::status::SharedTrackingStatus;

/// Default animation tick interval (10 frames per second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for a tracking session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Driver settings (steps per animation, zoom, trail).
    pub driver: DriverConfig,
    /// Time between animation ticks.
    pub tick_interval: Duration,
    /// Follow state when the session starts.
    pub initial_follow: FollowState,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            driver: DriverConfig::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            initial_follow: FollowState::Following,
        }
    }
}

/// Engine state for one tracked object, plus its sinks.
///
/// Normally driven by [`spawn_session`]; can be driven directly for
/// deterministic replays by feeding [`SessionCommand`]s.
pub struct TrackingSession {
    driver: InterpolationDriver,
    follow: FollowController,
    marker: Box<dyn PositionSink>,
    camera: Box<dyn CameraSink>,
    status: Option<SharedTrackingStatus>,
}

impl TrackingSession {
    pub fn new(
        driver_config: DriverConfig,
        scheduler: Box<dyn TickScheduler>,
        initial_follow: FollowState,
        marker: Box<dyn PositionSink>,
        camera: Box<dyn CameraSink>,
    ) -> Self {
        Self {
            driver: InterpolationDriver::new(driver_config, scheduler),
            follow: FollowController::with_state(initial_follow),
            marker,
            camera,
            status: None,
        }
    }

    /// Report follow changes and sample counters to `status`.
    pub fn with_status(mut self, status: SharedTrackingStatus) -> Self {
        status.set_follow_state(self.follow.state());
        self.status = Some(status);
        self
    }

    /// Apply one command.
    pub fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Sample(sample) => self.on_sample(sample),
            SessionCommand::Tick { generation } => self.on_tick(generation),
            SessionCommand::DragStart => self.on_drag_start(),
            SessionCommand::Drag { dlat, dlon } => {
                self.on_drag_start();
                self.camera.pan_by(dlat, dlon);
            }
            SessionCommand::Refollow => {
                let displayed = self.driver.displayed();
                let transition = self.follow.request_follow(displayed, self.camera.as_mut());
                if transition == FollowTransition::Engaged {
                    self.publish_follow();
                }
            }
            SessionCommand::Reset => {
                self.driver.reset();
                self.marker.set_trail_points(&[]);
                self.marker.clear_position();
                debug!("Session reset");
            }
        }
    }

    pub fn follow_state(&self) -> FollowState {
        self.follow.state()
    }

    pub fn driver(&self) -> &InterpolationDriver {
        &self.driver
    }

    fn on_sample(&mut self, sample: Sample) {
        let follow = self.follow.state();
        let mut sinks = Sinks::new(self.marker.as_mut(), self.camera.as_mut());
        match self.driver.on_sample(sample, follow, &mut sinks) {
            Ok(outcome) => {
                if let SampleOutcome::Rendered(point) = outcome {
                    info!(position = %point, "Tracking started");
                }
                if let Some(status) = &self.status {
                    status.sample_accepted();
                }
            }
            Err(e) => {
                warn!(error = %e, sequence = sample.sequence, "Sample rejected");
                if let Some(status) = &self.status {
                    status.sample_rejected();
                }
            }
        }
    }

    fn on_tick(&mut self, generation: u64) {
        let follow = self.follow.state();
        let mut sinks = Sinks::new(self.marker.as_mut(), self.camera.as_mut());
        if let TickOutcome::Completed(point) = self.driver.tick(generation, follow, &mut sinks) {
            debug!(generation, position = %point, "Reached sample");
        }
    }

    fn on_drag_start(&mut self) {
        if self.follow.on_drag_start() == FollowTransition::Released {
            self.publish_follow();
        }
    }

    fn publish_follow(&self) {
        let state = self.follow.state();
        info!(follow = state.display_status(), "Follow mode changed");
        if let Some(status) = &self.status {
            status.set_follow_state(state);
        }
    }
}

/// The session task is gone (shut down or panicked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Tracking session is closed")]
pub struct SessionClosed;

/// Cloneable sender side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn submit_sample(&self, sample: Sample) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Sample(sample))
    }

    pub fn drag_started(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::DragStart)
    }

    /// Release the camera and shift it by a lat/lon offset, in order with
    /// any ticks already queued.
    pub fn drag(&self, dlat: f64, dlon: f64) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Drag { dlat, dlon })
    }

    pub fn request_follow(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Refollow)
    }

    pub fn reset(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Reset)
    }

    pub fn send(&self, command: SessionCommand) -> Result<(), SessionClosed> {
        self.commands.send(command).map_err(|_| SessionClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Start a session task.
///
/// The task runs until `cancellation` fires or every [`SessionHandle`] is
/// dropped. On exit the driver is dropped, which cancels any live tick timer.
pub fn spawn_session(
    config: SessionConfig,
    marker: Box<dyn PositionSink>,
    camera: Box<dyn CameraSink>,
    status: SharedTrackingStatus,
    cancellation: CancellationToken,
) -> (SessionHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = TokioTickScheduler::new(config.tick_interval, &tx);

    let mut session = TrackingSession::new(
        config.driver,
        Box::new(scheduler),
        config.initial_follow,
        marker,
        camera,
    )
    .with_status(status);

    let task = tokio::spawn(async move {
        debug!("Tracking session started");
        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    debug!("Tracking session cancelled");
                    break;
                }
                command = rx.recv() => match command {
                    Some(command) => session.handle(command),
                    None => {
                        debug!("All session handles dropped");
                        break;
                    }
                }
            }
        }
        drop(session);
    });

    (SessionHandle { commands: tx }, task)
}
