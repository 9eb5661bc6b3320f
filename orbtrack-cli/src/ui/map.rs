//! World map with the station marker and its trail.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution},
        Block, Widget,
    },
};

use orbtrack::follow::FollowState;
use orbtrack::geo::{crosses_antimeridian, GeoPoint};
use orbtrack::sink::{clamp_view_center, view_spans, SceneSnapshot};

/// Visible lat/lon window derived from camera centre and zoom.
///
/// Zoom `z` shows `360 / z` degrees of longitude and half that of latitude.
/// The centre is pulled inwards so the window never leaves the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: GeoPoint,
    lon_span: f64,
    lat_span: f64,
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        let (lon_span, lat_span) = view_spans(zoom);
        Self {
            center: clamp_view_center(center, zoom),
            lon_span,
            lat_span,
        }
    }

    /// Camera centre if known, else the marker, else 0,0.
    pub fn for_scene(scene: &SceneSnapshot) -> Self {
        let center = scene
            .camera_center
            .or(scene.marker)
            .unwrap_or(GeoPoint::new(0.0, 0.0));
        Self::new(center, scene.zoom)
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_span
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_span
    }

    /// Degrees to move for a pan of `dx`/`dy` window fractions.
    pub fn offset_for(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dy * self.lat_span, dx * self.lon_span)
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.lon_span / 2.0;
        [self.center.longitude - half, self.center.longitude + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.lat_span / 2.0;
        [self.center.latitude - half, self.center.latitude + half]
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        (x0..=x1).contains(&point.longitude) && (y0..=y1).contains(&point.latitude)
    }
}

/// Canvas widget drawing coastlines, trail and marker.
pub struct MapWidget<'a> {
    scene: &'a SceneSnapshot,
    follow: FollowState,
}

impl<'a> MapWidget<'a> {
    pub fn new(scene: &'a SceneSnapshot, follow: FollowState) -> Self {
        Self { scene, follow }
    }

    fn title(&self) -> String {
        match self.scene.marker {
            Some(_) => format!(
                " ISS Tracker | {} | zoom {} ",
                self.follow.display_status(),
                self.scene.zoom
            ),
            None => " ISS Tracker | waiting for position ".to_string(),
        }
    }
}

/// Consecutive trail pairs worth drawing as line segments.
pub fn trail_segments(trail: &[GeoPoint]) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
    trail
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(from, to)| !crosses_antimeridian(from.longitude, to.longitude))
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let viewport = Viewport::for_scene(self.scene);
        let title = self.title();
        let marker_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

        Canvas::default()
            .block(Block::bordered().title(title))
            .marker(Marker::Braille)
            .x_bounds(viewport.x_bounds())
            .y_bounds(viewport.y_bounds())
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();

                for (from, to) in trail_segments(&self.scene.trail) {
                    ctx.draw(&CanvasLine::new(
                        from.longitude,
                        from.latitude,
                        to.longitude,
                        to.latitude,
                        Color::Yellow,
                    ));
                }

                if let Some(marker) = self.scene.marker {
                    if viewport.contains(marker) {
                        ctx.print(
                            marker.longitude,
                            marker.latitude,
                            Span::styled("●", marker_style),
                        );
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_one_shows_world() {
        let viewport = Viewport::new(GeoPoint::new(30.0, 100.0), 1);
        assert_eq!(viewport.x_bounds(), [-180.0, 180.0]);
        assert_eq!(viewport.y_bounds(), [-90.0, 90.0]);
    }

    #[test]
    fn test_viewport_centres_on_camera() {
        let viewport = Viewport::new(GeoPoint::new(10.0, 20.0), 4);
        assert_eq!(viewport.x_bounds(), [-25.0, 65.0]);
        assert_eq!(viewport.y_bounds(), [-12.5, 32.5]);
        assert!(viewport.contains(GeoPoint::new(10.0, 20.0)));
        assert!(!viewport.contains(GeoPoint::new(10.0, 100.0)));
    }

    #[test]
    fn test_viewport_stays_on_map() {
        let viewport = Viewport::new(GeoPoint::new(80.0, 175.0), 4);
        assert_eq!(viewport.x_bounds(), [90.0, 180.0]);
        assert_eq!(viewport.y_bounds(), [45.0, 90.0]);
    }

    #[test]
    fn test_pan_offset_scales_with_zoom() {
        let viewport = Viewport::new(GeoPoint::new(0.0, 0.0), 4);
        assert_eq!(viewport.offset_for(0.25, -0.5), (-22.5, 22.5));

        let world = Viewport::new(GeoPoint::new(0.0, 0.0), 1);
        assert_eq!(world.offset_for(0.25, 0.0), (0.0, 90.0));
    }

    #[test]
    fn test_scene_without_camera_uses_marker() {
        let scene = SceneSnapshot {
            marker: Some(GeoPoint::new(0.0, 50.0)),
            zoom: 2,
            ..Default::default()
        };
        assert_eq!(Viewport::for_scene(&scene).x_bounds(), [-40.0, 140.0]);
    }

    #[test]
    fn test_trail_segments_skip_antimeridian_jump() {
        let trail = [
            GeoPoint::new(0.0, 170.0),
            GeoPoint::new(1.0, 179.0),
            GeoPoint::new(2.0, -179.0),
            GeoPoint::new(3.0, -170.0),
        ];
        let segments: Vec<_> = trail_segments(&trail).collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].1, trail[1]);
        assert_eq!(segments[1].0, trail[2]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_viewport_never_leaves_map(
                lat in -90.0..=90.0_f64,
                lon in -180.0..=180.0_f64,
                zoom in 1u8..=10
            ) {
                let viewport = Viewport::new(GeoPoint::new(lat, lon), zoom);
                let [x0, x1] = viewport.x_bounds();
                let [y0, y1] = viewport.y_bounds();
                prop_assert!(x0 >= -180.0 - 1e-9 && x1 <= 180.0 + 1e-9);
                prop_assert!(y0 >= -90.0 - 1e-9 && y1 <= 90.0 + 1e-9);
                prop_assert!((x1 - x0 - viewport.lon_span()).abs() < 1e-9);
            }
        }
    }
}
