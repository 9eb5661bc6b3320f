//! Camera follow mode.
//!
//! # State Machine
//!
//! ```text
//! Following --[user drag begins]--> Released
//! Released  --[re-follow requested]--> Following   (one immediate pan)
//! Following --[user drag begins]--> Following      (no-op)
//! Released  --[user drag begins]--> Released       (no-op)
//! Following --[re-follow requested]--> Following   (no-op, no pan)
//! ```
//!
//! Samples and animation ticks never change the state; only the two user
//! triggers do.

use tracing::debug;

use crate::geo::GeoPoint;
use crate::sink::CameraSink;

/// Whether the camera tracks the animated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowState {
    /// Camera re-centres on every animated frame.
    #[default]
    Following,
    /// User took over the camera; frames only move the marker.
    Released,
}

impl FollowState {
    /// User-facing label.
    pub fn display_status(&self) -> &'static str {
        match self {
            FollowState::Following => "Following",
            FollowState::Released => "Free look",
        }
    }

    pub fn is_following(&self) -> bool {
        matches!(self, FollowState::Following)
    }
}

/// Result of feeding a trigger to the [`FollowController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowTransition {
    /// State did not change.
    Unchanged,
    /// Following → Released.
    Released,
    /// Released → Following.
    Engaged,
}

/// Two-state follow controller.
#[derive(Debug, Default)]
pub struct FollowController {
    state: FollowState,
}

impl FollowController {
    /// Start in `Following`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in an explicit state.
    pub fn with_state(state: FollowState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    /// The user started dragging the camera.
    pub fn on_drag_start(&mut self) -> FollowTransition {
        match self.state {
            FollowState::Following => {
                self.state = FollowState::Released;
                debug!("Follow released by user drag");
                FollowTransition::Released
            }
            FollowState::Released => FollowTransition::Unchanged,
        }
    }

    /// The user asked the camera to follow again.
    ///
    /// On the `Released → Following` edge the camera is panned once to
    /// `displayed` (the currently shown position, if any) so the view does
    /// not wait for the next sample.
    pub fn request_follow(
        &mut self,
        displayed: Option<GeoPoint>,
        camera: &mut dyn CameraSink,
    ) -> FollowTransition {
        match self.state {
            FollowState::Following => FollowTransition::Unchanged,
            FollowState::Released => {
                self.state = FollowState::Following;
                if let Some(point) = displayed {
                    camera.pan_to(point, true);
                }
                debug!(displayed = ?displayed, "Follow re-engaged");
                FollowTransition::Engaged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::recording::RecordingSink;

    #[test]
    fn test_initial_state_is_following() {
        let controller = FollowController::new();
        assert_eq!(controller.state(), FollowState::Following);
        assert!(controller.state().is_following());
    }

    #[test]
    fn test_drag_releases() {
        let mut controller = FollowController::new();
        assert_eq!(controller.on_drag_start(), FollowTransition::Released);
        assert_eq!(controller.state(), FollowState::Released);
    }

    #[test]
    fn test_repeated_drag_is_idempotent() {
        let mut controller = FollowController::new();
        controller.on_drag_start();
        assert_eq!(controller.on_drag_start(), FollowTransition::Unchanged);
        assert_eq!(controller.state(), FollowState::Released);
    }

    #[test]
    fn test_refollow_pans_exactly_once() {
        let mut controller = FollowController::new();
        let mut camera = RecordingSink::default();
        let here = GeoPoint::new(12.0, 34.0);

        controller.on_drag_start();
        let transition = controller.request_follow(Some(here), &mut camera);

        assert_eq!(transition, FollowTransition::Engaged);
        assert_eq!(controller.state(), FollowState::Following);
        assert_eq!(camera.pans(), vec![(here, true)]);
    }

    #[test]
    fn test_refollow_while_following_is_noop() {
        let mut controller = FollowController::new();
        let mut camera = RecordingSink::default();

        let transition = controller.request_follow(Some(GeoPoint::new(1.0, 1.0)), &mut camera);

        assert_eq!(transition, FollowTransition::Unchanged);
        assert!(camera.calls.is_empty());
    }

    #[test]
    fn test_refollow_without_position_does_not_pan() {
        let mut controller = FollowController::with_state(FollowState::Released);
        let mut camera = RecordingSink::default();

        assert_eq!(
            controller.request_follow(None, &mut camera),
            FollowTransition::Engaged
        );
        assert!(camera.calls.is_empty());
    }

    #[test]
    fn test_display_status() {
        assert_eq!(FollowState::Following.display_status(), "Following");
        assert_eq!(FollowState::Released.display_status(), "Free look");
    }
}
