//! Interpolation driver: turns sparse samples into a smooth stream of frames.
//!
//! Each accepted sample starts an animation from the currently displayed
//! position to the sample over a fixed number of ticks. A newer sample
//! preempts the running animation; the new one starts wherever the marker is
//! at that moment, so visible motion never jumps.
//!
//! # Timers and generations
//!
//! The driver does not own a clock. It asks a [`TickScheduler`] to deliver
//! `tick(generation)` calls and keeps the returned [`TimerHandle`] in the
//! live [`AnimationState`]. Every new animation bumps the generation, and a
//! tick whose generation is not the live one is a no-op. A tick that was
//! already queued when its animation got cancelled therefore cannot leak a
//! stale frame.
//!
//! ```text
//! on_sample(S1) ──► render S1 immediately (no timer)
//! on_sample(S2) ──► gen 1: displayed → S2, ticks 1..=N
//! on_sample(S3) ──► cancel gen 1, gen 2: displayed → S3
//! tick(gen 1)   ──► Stale (ignored)
//! ```

mod driver;
mod scheduler;
mod state;

pub use driver::{DriverConfig, InterpolationDriver, SampleOutcome, TickOutcome};
pub use scheduler::{ManualScheduler, ManualTimerHandle, TickScheduler, TimerHandle};
pub use state::{AnimationState, Sample, SampleError};
