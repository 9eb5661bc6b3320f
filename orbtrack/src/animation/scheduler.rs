//! Timer seam between the driver and whatever clock drives it.

use std::sync::Arc;

use parking_lot::Mutex;

/// Schedules `total_steps` ticks for an animation generation.
///
/// Implementations deliver ticks back to the driver's owner, which calls
/// [`InterpolationDriver::tick`](super::InterpolationDriver::tick) with the
/// same generation.
pub trait TickScheduler: Send {
    fn schedule(&mut self, generation: u64, total_steps: u32) -> Box<dyn TimerHandle>;
}

/// Handle to a scheduled tick sequence.
pub trait TimerHandle: Send {
    /// Stop delivering ticks. Must be idempotent.
    fn cancel(&mut self);
}

/// Scheduler that only records requests; ticks are driven by hand.
///
/// Used for deterministic replays and tests: the caller inspects
/// [`ManualScheduler::scheduled`] and feeds ticks itself.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    log: Arc<Mutex<ManualLog>>,
}

#[derive(Debug, Default)]
struct ManualLog {
    scheduled: Vec<(u64, u32)>,
    cancelled: Vec<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(generation, total_steps)` for every schedule request, in order.
    pub fn scheduled(&self) -> Vec<(u64, u32)> {
        self.log.lock().scheduled.clone()
    }

    /// Generations whose timers were cancelled, in order.
    pub fn cancelled(&self) -> Vec<u64> {
        self.log.lock().cancelled.clone()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, generation: u64, total_steps: u32) -> Box<dyn TimerHandle> {
        self.log.lock().scheduled.push((generation, total_steps));
        Box::new(ManualTimerHandle {
            generation,
            log: Arc::clone(&self.log),
            cancelled: false,
        })
    }
}

/// Handle returned by [`ManualScheduler`].
#[derive(Debug)]
pub struct ManualTimerHandle {
    generation: u64,
    log: Arc<Mutex<ManualLog>>,
    cancelled: bool,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.log.lock().cancelled.push(self.generation);
        }
    }
}
