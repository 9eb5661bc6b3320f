//! Samples and per-animation state.

use std::fmt;

use thiserror::Error;

use super::scheduler::TimerHandle;
use crate::geo::{GeoError, GeoPoint};

/// One absolute position observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Observed position.
    pub point: GeoPoint,
    /// Arrival order; larger is newer. The position source uses its
    /// timestamp (seconds since the epoch).
    pub sequence: u64,
}

impl Sample {
    pub fn new(point: GeoPoint, sequence: u64) -> Self {
        Self { point, sequence }
    }
}

/// Reasons a sample is dropped without touching any state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// Coordinates are not a valid position.
    #[error("Invalid sample coordinates: {0}")]
    InvalidCoordinate(#[from] GeoError),

    /// Sample is older than one already accepted.
    #[error("Out-of-order sample: sequence {sequence} is older than {latest}")]
    OutOfOrder { sequence: u64, latest: u64 },
}

/// The single live animation of a tracking session.
pub struct AnimationState {
    /// Where the animation started (the position displayed when the sample arrived).
    pub previous: GeoPoint,
    /// Where it ends (the sample).
    pub target: GeoPoint,
    /// Ticks applied so far.
    pub step_index: u32,
    /// Ticks needed to reach the target.
    pub total_steps: u32,
    /// Generation this animation answers to.
    pub generation: u64,
    /// Pending tick timer, cleared once the animation stops.
    pub(crate) timer: Option<Box<dyn TimerHandle>>,
}

impl AnimationState {
    /// Interpolation fraction after the current step, in [0, 1].
    pub fn fraction(&self) -> f64 {
        (self.step_index as f64 / self.total_steps as f64).min(1.0)
    }

    /// True while a timer is attached.
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Cancel and drop the timer, if any.
    pub(crate) fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl fmt::Debug for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationState")
            .field("previous", &self.previous)
            .field("target", &self.target)
            .field("step_index", &self.step_index)
            .field("total_steps", &self.total_steps)
            .field("generation", &self.generation)
            .field("has_timer", &self.timer.is_some())
            .finish()
    }
}
