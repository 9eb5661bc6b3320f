//! Lock-protected scene state shared between the engine and a renderer.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{CameraSink, PositionSink};
use crate::geo::GeoPoint;

/// Longitude span shown at zoom 1.
const WORLD_LON_SPAN: f64 = 360.0;

/// Visible `(lon_span, lat_span)` in degrees at `zoom`.
///
/// Zoom `z` shows `360 / z` degrees of longitude and half that of latitude.
pub fn view_spans(zoom: u8) -> (f64, f64) {
    let lon_span = WORLD_LON_SPAN / f64::from(zoom.max(1));
    (lon_span, lon_span / 2.0)
}

/// Pull `center` inwards so the window at `zoom` stays on the map.
pub fn clamp_view_center(center: GeoPoint, zoom: u8) -> GeoPoint {
    let (lon_span, lat_span) = view_spans(zoom);
    let half_lon = lon_span / 2.0;
    let half_lat = lat_span / 2.0;
    GeoPoint::new(
        center.latitude.clamp(-90.0 + half_lat, 90.0 - half_lat),
        center.longitude.clamp(-180.0 + half_lon, 180.0 - half_lon),
    )
}

/// Point-in-time copy of the scene for drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    /// Marker position, `None` until the first sample.
    pub marker: Option<GeoPoint>,
    /// Trail points, oldest first.
    pub trail: Vec<GeoPoint>,
    /// Where the camera is centred, `None` until first positioned.
    pub camera_center: Option<GeoPoint>,
    /// Current zoom level.
    pub zoom: u8,
    /// Number of camera pans received.
    pub pan_count: u64,
}

/// Scene shared between the session task and the UI.
///
/// Cloning is cheap; all clones see the same state. Manual panning arrives
/// through [`CameraSink::pan_by`] from the session task, so it is ordered with
/// the follow pans.
#[derive(Debug, Clone)]
pub struct SharedScene {
    inner: Arc<Mutex<SceneSnapshot>>,
}

impl SharedScene {
    /// Create an empty scene at the given zoom.
    pub fn new(zoom: u8) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SceneSnapshot {
                zoom,
                ..Default::default()
            })),
        }
    }

    /// Copy of the current scene.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.inner.lock().clone()
    }

    /// Change the zoom level, keeping it within `min..=max`.
    pub fn set_zoom(&self, zoom: u8, min: u8, max: u8) {
        self.inner.lock().zoom = zoom.clamp(min, max);
    }
}

impl PositionSink for SharedScene {
    fn set_position(&mut self, point: GeoPoint) {
        self.inner.lock().marker = Some(point);
    }

    fn set_trail_points(&mut self, points: &[GeoPoint]) {
        let mut scene = self.inner.lock();
        scene.trail.clear();
        scene.trail.extend_from_slice(points);
    }

    fn clear_position(&mut self) {
        self.inner.lock().marker = None;
    }
}

impl CameraSink for SharedScene {
    fn pan_to(&mut self, point: GeoPoint, _animate: bool) {
        let mut scene = self.inner.lock();
        scene.camera_center = Some(point);
        scene.pan_count += 1;
    }

    fn set_view(&mut self, point: GeoPoint, zoom: u8) {
        let mut scene = self.inner.lock();
        scene.camera_center = Some(point);
        scene.zoom = zoom;
    }

    fn pan_by(&mut self, dlat: f64, dlon: f64) {
        let mut scene = self.inner.lock();
        let start = scene
            .camera_center
            .or(scene.marker)
            .unwrap_or(GeoPoint::new(0.0, 0.0));
        let start = clamp_view_center(start, scene.zoom);
        let moved = GeoPoint::new(start.latitude + dlat, start.longitude + dlon);
        scene.camera_center = Some(clamp_view_center(moved, scene.zoom));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let scene = SharedScene::new(4);
        let mut writer = scene.clone();

        writer.set_position(GeoPoint::new(1.0, 2.0));
        writer.set_trail_points(&[GeoPoint::new(1.0, 1.0), GeoPoint::new(1.0, 2.0)]);

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.marker, Some(GeoPoint::new(1.0, 2.0)));
        assert_eq!(snapshot.trail.len(), 2);
        assert_eq!(snapshot.zoom, 4);
    }

    #[test]
    fn test_camera_calls() {
        let mut scene = SharedScene::new(2);
        scene.set_view(GeoPoint::new(10.0, 20.0), 5);
        scene.pan_to(GeoPoint::new(11.0, 21.0), false);

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.camera_center, Some(GeoPoint::new(11.0, 21.0)));
        assert_eq!(snapshot.zoom, 5);
        assert_eq!(snapshot.pan_count, 1);
    }

    #[test]
    fn test_pan_by_stays_inside_map() {
        let mut scene = SharedScene::new(2);
        scene.set_view(GeoPoint::new(0.0, 80.0), 2);

        // Zoom 2 shows 180 x 90 degrees, so the centre stops at lon 90.
        for _ in 0..5 {
            scene.pan_by(0.0, 30.0);
        }
        let center = scene.snapshot().camera_center.unwrap();
        assert_eq!(center.longitude, 90.0);

        // One press back moves the view immediately.
        scene.pan_by(0.0, -30.0);
        let center = scene.snapshot().camera_center.unwrap();
        assert_eq!(center.longitude, 60.0);
    }

    #[test]
    fn test_pan_by_clamps_latitude() {
        let mut scene = SharedScene::new(4);
        scene.set_view(GeoPoint::new(60.0, 0.0), 4);

        scene.pan_by(40.0, 0.0);
        // Zoom 4 shows 45 degrees of latitude.
        assert_eq!(scene.snapshot().camera_center.unwrap().latitude, 67.5);
    }

    #[test]
    fn test_pan_by_starts_from_marker_without_camera() {
        let mut scene = SharedScene::new(4);
        scene.set_position(GeoPoint::new(10.0, 20.0));

        scene.pan_by(1.0, -5.0);
        assert_eq!(
            scene.snapshot().camera_center,
            Some(GeoPoint::new(11.0, 15.0))
        );
        assert_eq!(scene.snapshot().pan_count, 0);
    }

    #[test]
    fn test_clear_position() {
        let mut scene = SharedScene::new(4);
        scene.set_position(GeoPoint::new(10.0, 20.0));
        scene.clear_position();
        assert_eq!(scene.snapshot().marker, None);
    }

    #[test]
    fn test_clamp_view_center_at_world_zoom() {
        let center = clamp_view_center(GeoPoint::new(30.0, 100.0), 1);
        assert_eq!(center, GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_set_zoom_clamps() {
        let scene = SharedScene::new(4);
        scene.set_zoom(30, 1, 8);
        assert_eq!(scene.snapshot().zoom, 8);
    }
}
