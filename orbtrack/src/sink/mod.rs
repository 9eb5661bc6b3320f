//! Output interfaces for the tracking engine.
//!
//! The engine never talks to a rendering library directly. It pushes
//! positions to a [`PositionSink`] (marker and trail) and, while following,
//! to a [`CameraSink`]. Renderers implement these traits; [`SharedScene`] is
//! a ready-made implementation that keeps the latest state behind a lock for
//! a UI thread to read.

mod scene;

pub use scene::{clamp_view_center, view_spans, SceneSnapshot, SharedScene};

use crate::geo::GeoPoint;

/// Receives marker and trail updates.
pub trait PositionSink: Send {
    /// Move the marker to `point`.
    fn set_position(&mut self, point: GeoPoint);

    /// Replace the drawn trail with `points` (oldest first).
    fn set_trail_points(&mut self, points: &[GeoPoint]);

    /// Remove the marker until the next position arrives.
    fn clear_position(&mut self);
}

/// Receives camera movements.
pub trait CameraSink: Send {
    /// Centre the view on `point`, optionally animating the move.
    fn pan_to(&mut self, point: GeoPoint, animate: bool);

    /// Centre the view on `point` at an explicit zoom level.
    fn set_view(&mut self, point: GeoPoint, zoom: u8);

    /// Shift the view by a lat/lon offset (manual exploration).
    fn pan_by(&mut self, dlat: f64, dlon: f64);
}

/// Borrowed pair of sinks handed to the engine for one operation.
pub struct Sinks<'a> {
    pub marker: &'a mut dyn PositionSink,
    pub camera: &'a mut dyn CameraSink,
}

impl<'a> Sinks<'a> {
    pub fn new(marker: &'a mut dyn PositionSink, camera: &'a mut dyn CameraSink) -> Self {
        Self { marker, camera }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! Sink that records every call, for engine tests.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum SinkCall {
        Position(GeoPoint),
        Trail(Vec<GeoPoint>),
        Pan(GeoPoint, bool),
        View(GeoPoint, u8),
        ClearPosition,
        PanBy(f64, f64),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub calls: Vec<SinkCall>,
    }

    impl RecordingSink {
        pub fn positions(&self) -> Vec<GeoPoint> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::Position(p) => Some(*p),
                    _ => None,
                })
                .collect()
        }

        pub fn pans(&self) -> Vec<(GeoPoint, bool)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::Pan(p, animate) => Some((*p, *animate)),
                    _ => None,
                })
                .collect()
        }

        pub fn views(&self) -> Vec<(GeoPoint, u8)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::View(p, zoom) => Some((*p, *zoom)),
                    _ => None,
                })
                .collect()
        }

        pub fn last_trail(&self) -> Option<Vec<GeoPoint>> {
            self.calls.iter().rev().find_map(|c| match c {
                SinkCall::Trail(points) => Some(points.clone()),
                _ => None,
            })
        }

        pub fn clear(&mut self) {
            self.calls.clear();
        }
    }

    impl PositionSink for RecordingSink {
        fn set_position(&mut self, point: GeoPoint) {
            self.calls.push(SinkCall::Position(point));
        }

        fn set_trail_points(&mut self, points: &[GeoPoint]) {
            self.calls.push(SinkCall::Trail(points.to_vec()));
        }

        fn clear_position(&mut self) {
            self.calls.push(SinkCall::ClearPosition);
        }
    }

    impl CameraSink for RecordingSink {
        fn pan_to(&mut self, point: GeoPoint, animate: bool) {
            self.calls.push(SinkCall::Pan(point, animate));
        }

        fn set_view(&mut self, point: GeoPoint, zoom: u8) {
            self.calls.push(SinkCall::View(point, zoom));
        }

        fn pan_by(&mut self, dlat: f64, dlon: f64) {
            self.calls.push(SinkCall::PanBy(dlat, dlon));
        }
    }
}
