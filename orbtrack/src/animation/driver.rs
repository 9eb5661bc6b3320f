//! The interpolation driver.

use std::time::Duration;

use tracing::{debug, trace};

use super::scheduler::TickScheduler;
use super::state::{AnimationState, Sample, SampleError};
use crate::follow::FollowState;
use crate::geo::{ease, GeoPoint};
use crate::sink::Sinks;
use crate::trail::{TrailBuffer, TrailConfig};

/// Default zoom used when the camera first locks onto the object.
pub const DEFAULT_INITIAL_ZOOM: u8 = 4;

/// Configuration for the interpolation driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Ticks per animation cycle.
    pub total_steps: u32,
    /// Zoom passed to `set_view` when the first sample is shown.
    pub initial_zoom: u8,
    /// Trail settings.
    pub trail: TrailConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::from_intervals(Duration::from_millis(5000), Duration::from_millis(100))
    }
}

impl DriverConfig {
    /// Steps per animation = `poll_interval / tick_interval`, at least one.
    ///
    /// 5000ms polling with 100ms ticks gives 50 steps, so an animation ends
    /// right about when the next sample is due.
    pub fn from_intervals(poll_interval: Duration, tick_interval: Duration) -> Self {
        let tick_ms = tick_interval.as_millis().max(1);
        let steps = (poll_interval.as_millis() / tick_ms).clamp(1, u32::MAX as u128) as u32;
        Self {
            total_steps: steps,
            initial_zoom: DEFAULT_INITIAL_ZOOM,
            trail: TrailConfig::default(),
        }
    }

    pub fn with_initial_zoom(mut self, zoom: u8) -> Self {
        self.initial_zoom = zoom;
        self
    }

    pub fn with_trail(mut self, trail: TrailConfig) -> Self {
        self.trail = trail;
        self
    }
}

/// What [`InterpolationDriver::on_sample`] did with an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// First sample: shown immediately, no animation.
    Rendered(GeoPoint),
    /// Animation started towards the sample.
    Animating { generation: u64, total_steps: u32 },
}

/// Result of one [`InterpolationDriver::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Tick belongs to a superseded animation; nothing emitted.
    Stale,
    /// No animation is running; nothing emitted.
    Idle,
    /// Intermediate frame emitted.
    Frame {
        point: GeoPoint,
        step_index: u32,
        fraction: f64,
    },
    /// Final frame emitted; the displayed position equals the target.
    Completed(GeoPoint),
}

/// Drives animations between samples and maintains the trail.
///
/// Owns the animation state, the trail, and the last displayed position for
/// one tracking session. Dropping the driver cancels any pending timer.
pub struct InterpolationDriver {
    config: DriverConfig,
    scheduler: Box<dyn TickScheduler>,
    trail: TrailBuffer,
    displayed: Option<GeoPoint>,
    animation: Option<AnimationState>,
    generation: u64,
    latest_sequence: Option<u64>,
}

impl InterpolationDriver {
    /// Create a driver that schedules ticks through `scheduler`.
    pub fn new(config: DriverConfig, scheduler: Box<dyn TickScheduler>) -> Self {
        let trail = TrailBuffer::new(config.trail.clone());
        Self {
            config,
            scheduler,
            trail,
            displayed: None,
            animation: None,
            generation: 0,
            latest_sequence: None,
        }
    }

    /// Accept a new absolute sample.
    ///
    /// Invalid or out-of-order samples are rejected and leave every piece of
    /// state (including a running animation) untouched.
    pub fn on_sample(
        &mut self,
        sample: Sample,
        follow: FollowState,
        sinks: &mut Sinks<'_>,
    ) -> Result<SampleOutcome, SampleError> {
        sample.point.validate()?;
        if let Some(latest) = self.latest_sequence {
            if sample.sequence < latest {
                return Err(SampleError::OutOfOrder {
                    sequence: sample.sequence,
                    latest,
                });
            }
        }
        self.latest_sequence = Some(sample.sequence);

        let Some(current) = self.displayed else {
            let point = sample.point;
            self.displayed = Some(point);
            sinks.marker.set_position(point);
            if self.trail.append(point).changed() {
                sinks.marker.set_trail_points(&self.trail.snapshot());
            }
            if follow.is_following() {
                sinks.camera.set_view(point, self.config.initial_zoom);
            }
            debug!(position = %point, "First sample rendered");
            return Ok(SampleOutcome::Rendered(point));
        };

        // Invalidate the old timer before any new state exists.
        self.cancel_animation();
        self.generation += 1;

        let total_steps = self.config.total_steps;
        let timer = self.scheduler.schedule(self.generation, total_steps);
        self.animation = Some(AnimationState {
            previous: current,
            target: sample.point,
            step_index: 0,
            total_steps,
            generation: self.generation,
            timer: Some(timer),
        });

        debug!(
            generation = self.generation,
            from = %current,
            to = %sample.point,
            steps = total_steps,
            "Animation started"
        );

        Ok(SampleOutcome::Animating {
            generation: self.generation,
            total_steps,
        })
    }

    /// Advance the animation of `generation` by one step.
    pub fn tick(
        &mut self,
        generation: u64,
        follow: FollowState,
        sinks: &mut Sinks<'_>,
    ) -> TickOutcome {
        let Some(animation) = self.animation.as_mut() else {
            trace!(generation, "Tick without live animation");
            return TickOutcome::Idle;
        };
        if animation.generation != generation {
            trace!(
                generation,
                live = animation.generation,
                "Stale tick ignored"
            );
            return TickOutcome::Stale;
        }

        animation.step_index += 1;
        let fraction = animation.fraction();
        let step_index = animation.step_index;
        let finished = fraction >= 1.0;

        // The final frame lands exactly on the sample, free of rounding.
        let point = if finished {
            animation.target
        } else {
            animation
                .previous
                .interpolate(&animation.target, ease(fraction))
        };

        self.displayed = Some(point);
        sinks.marker.set_position(point);
        if follow.is_following() {
            sinks.camera.pan_to(point, false);
        }
        if self.trail.append(point).changed() {
            sinks.marker.set_trail_points(&self.trail.snapshot());
        }

        if finished {
            self.cancel_animation();
            trace!(generation, position = %point, "Animation completed");
            TickOutcome::Completed(point)
        } else {
            TickOutcome::Frame {
                point,
                step_index,
                fraction,
            }
        }
    }

    /// Forget everything: animation, trail, displayed position, ordering.
    ///
    /// Used when switching tracked sessions. Queued ticks become stale.
    pub fn reset(&mut self) {
        self.cancel_animation();
        self.generation += 1;
        self.trail.reset();
        self.displayed = None;
        self.latest_sequence = None;
    }

    /// Position currently shown, `None` before the first sample.
    pub fn displayed(&self) -> Option<GeoPoint> {
        self.displayed
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Live animation, if one is running.
    pub fn animation(&self) -> Option<&AnimationState> {
        self.animation.as_ref()
    }

    /// Generation of the most recently started animation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn cancel_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.cancel_timer();
        }
    }
}

impl Drop for InterpolationDriver {
    fn drop(&mut self) {
        self.cancel_animation();
    }
}
