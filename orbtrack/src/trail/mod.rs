//! Bounded trail of recently visited positions.
//!
//! Maintains the most recent positions of the tracked object for drawing a
//! path behind the marker.
//!
//! # Design
//!
//! - Stores the last `capacity` points (200 by default), oldest first
//! - Suppresses points that are effectively identical to the last one
//! - Resets when the object crosses the antimeridian, so a renderer never
//!   draws a segment wrapping the whole map
//! - Never rejects a point on latitude grounds

use std::collections::VecDeque;

use crate::geo::{crosses_antimeridian, GeoPoint};

/// Default maximum points to retain.
pub const DEFAULT_TRAIL_CAPACITY: usize = 200;

/// Default tolerance (in degrees) below which a point counts as unchanged.
/// ~0.1m at the equator.
pub const DEFAULT_DUPLICATE_EPSILON_DEG: f64 = 1e-6;

/// Configuration for the trail buffer.
#[derive(Debug, Clone)]
pub struct TrailConfig {
    /// Maximum points to retain. Values below 1 are treated as 1.
    pub capacity: usize,
    /// Coordinate difference below which a point is a duplicate.
    pub duplicate_epsilon: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TRAIL_CAPACITY,
            duplicate_epsilon: DEFAULT_DUPLICATE_EPSILON_DEG,
        }
    }
}

impl TrailConfig {
    /// Config with the given capacity and default duplicate tolerance.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }
}

/// What happened to the buffer on [`TrailBuffer::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailUpdate {
    /// Point matched the last one and was dropped.
    Unchanged,
    /// Point was added to the end of the trail.
    Appended,
    /// Trail was cleared at the antimeridian and restarted with this point.
    Reset,
}

impl TrailUpdate {
    /// True if the buffer contents changed.
    pub fn changed(&self) -> bool {
        !matches!(self, TrailUpdate::Unchanged)
    }
}

/// Trail buffer - bounded, ordered positions with discontinuity handling.
///
/// # Usage
///
/// ```
/// use orbtrack::geo::GeoPoint;
/// use orbtrack::trail::{TrailBuffer, TrailConfig};
///
/// let mut trail = TrailBuffer::new(TrailConfig::with_capacity(3));
/// trail.append(GeoPoint::new(10.0, 20.0));
/// trail.append(GeoPoint::new(10.0, 21.0));
/// assert_eq!(trail.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    /// Visited points (oldest first).
    points: VecDeque<GeoPoint>,
    config: TrailConfig,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

impl TrailBuffer {
    /// Create an empty trail.
    pub fn new(mut config: TrailConfig) -> Self {
        config.capacity = config.capacity.max(1);
        Self {
            points: VecDeque::with_capacity(config.capacity),
            config,
        }
    }

    /// Record a visited point.
    ///
    /// Near-duplicates of the last point are ignored. A jump of more than 180°
    /// of longitude clears the trail before inserting. The oldest points are
    /// dropped to stay within capacity.
    pub fn append(&mut self, point: GeoPoint) -> TrailUpdate {
        let mut update = TrailUpdate::Appended;

        if let Some(last) = self.points.back() {
            if last.approx_eq(&point, self.config.duplicate_epsilon) {
                return TrailUpdate::Unchanged;
            }
            if crosses_antimeridian(last.longitude, point.longitude) {
                self.points.clear();
                update = TrailUpdate::Reset;
            }
        }

        self.points.push_back(point);

        while self.points.len() > self.config.capacity {
            self.points.pop_front();
        }

        update
    }

    /// Current points in order, oldest first.
    pub fn snapshot(&self) -> Vec<GeoPoint> {
        self.points.iter().copied().collect()
    }

    /// Iterate over points (oldest first).
    pub fn points(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    /// Clear all points.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Most recent point.
    pub fn last(&self) -> Option<GeoPoint> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of retained points.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }
}
