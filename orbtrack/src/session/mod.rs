//! Tracking session: the integration layer around the engine.
//!
//! A session owns one [`InterpolationDriver`](crate::animation::InterpolationDriver),
//! the [`FollowController`](crate::follow::FollowController) and the output
//! sinks. All of them live inside a single tokio task; everything else talks
//! to the session through a [`SessionHandle`] by sending commands.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Sample     ┌──────────────────────────────────────┐
//! │   Poller     │─────────────►│            session task              │
//! └──────────────┘              │                                      │
//! ┌──────────────┐ Drag /       │  TrackingSession                     │
//! │  UI events   │─ Refollow ──►│   ├─ InterpolationDriver ─► sinks    │
//! └──────────────┘              │   └─ FollowController                │
//! ┌──────────────┐ Tick{gen}    │                                      │
//! │ tick timer   │─────────────►│                                      │
//! └──────────────┘              └──────────────────────────────────────┘
//! ```
//!
//! Because every mutation goes through one channel and one task, no locks
//! guard the engine state, and a tick can never interleave with a sample.

mod runner;
mod scheduler;

pub use runner::{spawn_session, SessionClosed, SessionConfig, SessionHandle, TrackingSession};
pub use scheduler::{TokioTickScheduler, TokioTimerHandle};

use crate::animation::Sample;

/// Messages processed by the session task, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// New absolute sample from the position source.
    Sample(Sample),
    /// Animation timer fired for `generation`.
    Tick { generation: u64 },
    /// User started dragging the camera.
    DragStart,
    /// User moved the camera by a lat/lon offset. Releases follow first.
    Drag { dlat: f64, dlon: f64 },
    /// User asked the camera to follow again.
    Refollow,
    /// Drop the trail and displayed position (switching tracked object).
    Reset,
}
