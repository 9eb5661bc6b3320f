//! Orbtrack - smooth live position tracking on a sphere
//!
//! This library turns a low-frequency stream of absolute position samples
//! (the International Space Station reports roughly every five seconds) into
//! a high-frequency animated trajectory, a bounded trail of visited points,
//! and a camera that either follows the object or is left alone while the
//! viewer explores.
//!
//! # Architecture
//!
//! ```text
//! PositionSource ──► Poller ──► SessionHandle ──► Session event loop
//!  (HTTP, 5s)                   (mpsc channel)     ├─ InterpolationDriver ─► TrailBuffer
//!                                                  ├─ FollowController
//!                                                  └─ sinks: marker/trail, camera
//! ```
//!
//! The engine itself ([`geo`], [`trail`], [`animation`], [`follow`]) is
//! synchronous and deterministic. Timers live at the edge in [`session`],
//! which confines all mutable state to a single tokio task.

pub mod animation;
pub mod config;
pub mod follow;
pub mod geo;
pub mod logging;
pub mod session;
pub mod sink;
pub mod source;
pub mod status;
pub mod telemetry;
pub mod trail;

/// Crate version, shown in CLI banners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
