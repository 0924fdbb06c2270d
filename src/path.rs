//! Emitter path tracking.
//!
//! A [`PathTracker`] records the trailing history of an emitter's position
//! as a decimated polyline: each tick the emitter reports where it is, and
//! the point is kept only once the emitter has moved past a minimum spacing
//! from the last recorded point. Old points age out implicitly through the
//! window buffer's overwrite-on-push semantics; there is no removal API.
//!
//! The tracker also derives geometry for external visualization and prop
//! placement ([`rings`](PathTracker::rings), [`zone_anchors`](PathTracker::zone_anchors)).
//! It produces positions and circles as data, never draws anything.

use crate::buffer::WindowBuffer;
use crate::field::TaperProfile;
use glam::{Quat, Vec3};

/// Trailing history of emitter positions, oldest to newest.
#[derive(Clone, Debug)]
pub struct PathTracker {
    points: WindowBuffer<Vec3>,
    min_spacing: f32,
}

impl PathTracker {
    /// Default number of retained path points.
    pub const DEFAULT_CAPACITY: usize = 50;
    /// Default minimum distance between consecutive recorded points.
    pub const DEFAULT_MIN_SPACING: f32 = 0.1;

    /// Create a tracker retaining at most `capacity` points, recording a
    /// new point only after the emitter moves more than `min_spacing` from
    /// the last one.
    ///
    /// # Panics
    ///
    /// Panics on zero capacity (via [`WindowBuffer::new`]); the
    /// [`WindStream`](crate::WindStream) builder validates both parameters
    /// and returns a [`ConfigError`](crate::ConfigError) instead.
    pub fn new(capacity: usize, min_spacing: f32) -> Self {
        Self {
            points: WindowBuffer::new(capacity),
            min_spacing,
        }
    }

    /// Record the emitter's current position if it has moved far enough.
    ///
    /// The very first position is always recorded. Returns whether the
    /// point was kept. O(1) amortized.
    pub fn append(&mut self, position: Vec3) -> bool {
        let moved = match self.points.last() {
            Some(&last) => (position - last).length() > self.min_spacing,
            None => true,
        };
        if moved {
            self.points.push(position);
        }
        moved
    }

    /// The live point sequence, oldest to newest. Read-only snapshot for
    /// field sampling and external visualization.
    #[inline]
    pub fn points(&self) -> &WindowBuffer<Vec3> {
        &self.points
    }

    /// Number of live path points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Configured minimum spacing between consecutive recorded points.
    #[inline]
    pub fn min_spacing(&self) -> f32 {
        self.min_spacing
    }

    /// Evenly spaced anchor positions along the live path.
    ///
    /// Picks every `capacity / count`-th point, oldest first, for hosts
    /// placing props (spherical wind zones and the like) along the trail.
    /// Returns fewer than `count` anchors while the path is still short,
    /// and nothing for `count == 0`.
    pub fn zone_anchors(&self, count: usize) -> Vec<Vec3> {
        if count == 0 {
            return Vec::new();
        }
        let stride = (self.points.capacity() / count).max(1);
        self.points
            .iter()
            .step_by(stride)
            .take(count)
            .copied()
            .collect()
    }

    /// Midpoint cross-section rings for every segment of the live path.
    ///
    /// Each ring sits halfway along its segment, oriented by the segment
    /// axis, with the taper radius evaluated at the midpoint's recency.
    /// Intended for external debug visualization; degenerate segments are
    /// skipped.
    pub fn rings(&self, taper: &TaperProfile, radial_multiplier: f32) -> Vec<PathRing> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        let denom = (n - 1) as f32;
        let mut rings = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let p1 = self.points[i];
            let p2 = self.points[i + 1];
            let axis = p2 - p1;
            if axis.length_squared() <= f32::EPSILON {
                continue;
            }
            rings.push(PathRing {
                center: (p1 + p2) * 0.5,
                axis,
                radius: taper.radius_at((i as f32 + 0.5) / denom, radial_multiplier),
            });
        }
        rings
    }
}

/// One circular cross-section of the path tube: a circle of `radius`
/// centered at `center`, lying in the plane perpendicular to `axis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathRing {
    /// Midpoint of the segment the ring belongs to.
    pub center: Vec3,
    /// Segment direction, unnormalized.
    pub axis: Vec3,
    /// Ring radius under the taper at this recency.
    pub radius: f32,
}

impl PathRing {
    /// Approximate the ring as a closed `n`-gon polyline.
    ///
    /// Returns `n + 1` points with the first repeated at the end so the
    /// polyline closes. Empty for `n == 0`.
    pub fn circle_points(&self, n: usize) -> Vec<Vec3> {
        if n == 0 {
            return Vec::new();
        }
        let normal = self.axis.normalize_or_zero();
        let spoke = normal.any_orthonormal_vector() * self.radius;
        (0..=n)
            .map(|i| {
                let theta = (i % n) as f32 / n as f32 * std::f32::consts::TAU;
                self.center + Quat::from_axis_angle(normal, theta) * spoke
            })
            .collect()
    }
}
