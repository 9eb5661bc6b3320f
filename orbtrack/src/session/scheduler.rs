//! Tokio-backed tick scheduler.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::SessionCommand;
use crate::animation::{TickScheduler, TimerHandle};

/// Schedules animation ticks as `SessionCommand::Tick` messages.
///
/// Each animation gets its own short-lived task that posts exactly
/// `total_steps` ticks at `tick_interval`, first one after one interval.
/// Holds only a weak sender so a session whose handles are all gone can
/// still shut down.
pub struct TokioTickScheduler {
    tick_interval: Duration,
    commands: WeakUnboundedSender<SessionCommand>,
}

impl TokioTickScheduler {
    pub fn new(tick_interval: Duration, commands: &UnboundedSender<SessionCommand>) -> Self {
        Self {
            tick_interval,
            commands: commands.downgrade(),
        }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&mut self, generation: u64, total_steps: u32) -> Box<dyn TimerHandle> {
        let cancellation = CancellationToken::new();
        let cancelled = cancellation.clone();
        let commands = self.commands.clone();
        let period = self.tick_interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            for _ in 0..total_steps {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => {
                        trace!(generation, "Tick timer cancelled");
                        return;
                    }
                    _ = ticker.tick() => {
                        let Some(tx) = commands.upgrade() else {
                            return;
                        };
                        if tx.send(SessionCommand::Tick { generation }).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Box::new(TokioTimerHandle {
            cancellation,
            task: Some(task),
        })
    }
}

/// Handle to a running tick task.
pub struct TokioTimerHandle {
    cancellation: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&mut self) {
        self.cancellation.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
