//! The wind-path force field.
//!
//! The trailing history of emitter positions forms a polyline; each pair of
//! consecutive points spans a truncated cone whose end-cap radii come from a
//! recency-based [`TaperProfile`]. A query position inside one of those cones
//! feels a spring force pulling it toward the path centerline.
//!
//! Sampling scans segments newest to oldest and the first containing segment
//! wins: overlapping cones are common near sharp turns, and the freshest
//! path data is authoritative.
//!
//! [`ForceField::sample`] is a pure function of its inputs. For a fixed path
//! snapshot it is safe to call from many threads at once; the per-tick write
//! (appending to the path) must simply happen before the field for that tick
//! is borrowed.
//!
//! # Example
//!
//! ```
//! use windstream::{FieldConfig, ForceField, TaperProfile, WindowBuffer};
//! use glam::Vec3;
//!
//! let mut points = WindowBuffer::new(8);
//! points.push(Vec3::ZERO);
//! points.push(Vec3::new(10.0, 0.0, 0.0));
//!
//! let config = FieldConfig::new(TaperProfile::new(1.0, 1.0).unwrap());
//! let field = ForceField::new(&points, config, 1.0);
//! let sample = field.sample(Vec3::new(5.0, 0.5, 0.0));
//! assert!(!sample.is_zero());
//! ```

use crate::buffer::WindowBuffer;
use crate::error::ConfigError;
use glam::Vec3;

/// Segments shorter than this (squared) are treated as degenerate and
/// skipped, so the projection step never divides by zero.
const DEGENERATE_AXIS_SQ: f32 = 1e-12;

/// Radius-versus-recency profile of the tubular path.
///
/// The recency parameter `t` runs from 0 at the oldest retained path point
/// to 1 at the newest. Radius grows linearly from `min_radius` to
/// `max_radius` as `t` increases: the path is widest right behind the
/// emitter and narrowest at its oldest trailing end. Both radii scale by
/// the radial multiplier (current speed over baseline speed), so the tube
/// fattens when the emitter moves faster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaperProfile {
    min_radius: f32,
    max_radius: f32,
}

impl TaperProfile {
    /// Create a profile, rejecting an inverted range.
    pub fn new(min_radius: f32, max_radius: f32) -> Result<Self, ConfigError> {
        if min_radius > max_radius {
            return Err(ConfigError::InvalidRadiusRange { min: min_radius, max: max_radius });
        }
        Ok(Self { min_radius, max_radius })
    }

    /// Radius at recency `t` (clamped to `[0, 1]`), scaled by `radial_multiplier`.
    pub fn radius_at(&self, t: f32, radial_multiplier: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        (self.min_radius + (self.max_radius - self.min_radius) * t) * radial_multiplier
    }

    /// Smallest (oldest-end) radius before scaling.
    #[inline]
    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    /// Largest (newest-end) radius before scaling.
    #[inline]
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }
}

/// How the spring force magnitude scales with distance off the centerline.
///
/// A tuning knob, not structure: pick the shape that reads best for the
/// effect instead of forking the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpringScale {
    /// Scale is `gain * |rejection|`: a plain linear spring softened (or
    /// stiffened) by `gain`.
    Proportional {
        /// Fraction of the rejection length fed into the spring.
        gain: f32,
    },
    /// Scale is `max(|rejection| - offset, 0)`: a dead zone of width
    /// `offset` around the centerline, affine beyond it.
    Offset {
        /// Dead-zone width around the centerline.
        offset: f32,
    },
}

impl SpringScale {
    /// Apply the scale to a rejection length.
    pub fn apply(&self, rejection_len: f32) -> f32 {
        match self {
            SpringScale::Proportional { gain } => gain * rejection_len,
            SpringScale::Offset { offset } => (rejection_len - offset).max(0.0),
        }
    }
}

impl Default for SpringScale {
    fn default() -> Self {
        SpringScale::Proportional { gain: 0.4 }
    }
}

/// Configuration for the force field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Radius-versus-recency profile of the path tube.
    pub taper: TaperProfile,
    /// Spring constant pulling particles toward the path centerline.
    pub spring_constant: f32,
    /// Distance scaling applied inside the spring formula.
    pub spring_scale: SpringScale,
    /// Extra margin added to the cone radius in the containment test,
    /// modeling the particle's own extent.
    pub containment_margin: f32,
}

impl FieldConfig {
    /// Config with the given taper and the stock tuning: spring constant
    /// 30, proportional scale 0.4, margin 0.25.
    pub fn new(taper: TaperProfile) -> Self {
        Self {
            taper,
            spring_constant: 30.0,
            spring_scale: SpringScale::default(),
            containment_margin: 0.25,
        }
    }
}

/// Result of a force-field query.
///
/// `projection` and `rejection` are the orthogonal decomposition of the
/// query offset from the containing segment's older endpoint: `projection`
/// is parallel to the segment, `rejection` perpendicular to it, and
/// `projection + rejection` recovers the offset. `axis` is the segment
/// vector itself, unnormalized, so its magnitude is the segment length.
///
/// A query outside every cone yields [`FieldSample::ZERO`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    /// Component of the query offset parallel to the segment axis.
    pub projection: Vec3,
    /// Component of the query offset perpendicular to the segment axis.
    pub rejection: Vec3,
    /// The containing segment's direction vector (magnitude = segment length).
    pub axis: Vec3,
    /// Spring force pulling the query point toward the centerline.
    pub force: Vec3,
}

impl FieldSample {
    /// The no-containment sentinel.
    pub const ZERO: FieldSample = FieldSample {
        projection: Vec3::ZERO,
        rejection: Vec3::ZERO,
        axis: Vec3::ZERO,
        force: Vec3::ZERO,
    };

    /// Whether this sample carries no force.
    ///
    /// True for the no-containment sentinel and for a query sitting exactly
    /// on the centerline; the integrator treats both as "leave the particle
    /// alone beyond plain velocity integration".
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.force == Vec3::ZERO
    }
}

/// Read-only sampler over one tick's path snapshot.
///
/// Borrowing the point buffer immutably is what enforces the per-tick phase
/// ordering: the tracker cannot be appended to while any field for that
/// snapshot is alive.
#[derive(Clone, Copy, Debug)]
pub struct ForceField<'a> {
    points: &'a WindowBuffer<Vec3>,
    config: FieldConfig,
    radial_multiplier: f32,
}

impl<'a> ForceField<'a> {
    /// Build a sampler over `points` with the given configuration.
    ///
    /// `radial_multiplier` is the ratio of the emitter's current speed to
    /// its baseline speed; 1.0 leaves the taper radii unscaled.
    pub fn new(points: &'a WindowBuffer<Vec3>, config: FieldConfig, radial_multiplier: f32) -> Self {
        Self { points, config, radial_multiplier }
    }

    /// The path snapshot this field samples against.
    #[inline]
    pub fn points(&self) -> &WindowBuffer<Vec3> {
        self.points
    }

    /// Sample the field at `query`.
    ///
    /// Scans segments newest to oldest; the first cone containing `query`
    /// produces the sample. Zero-length segments are skipped. Paths with
    /// fewer than two points have no segments, so every query misses; a
    /// miss is the expected common case, not an error.
    pub fn sample(&self, query: Vec3) -> FieldSample {
        let points = self.points;
        let n = points.len();
        if n < 2 {
            return FieldSample::ZERO;
        }
        let denom = (n - 1) as f32;

        for j in (1..n).rev() {
            let p1 = points[j - 1];
            let p2 = points[j];
            let axis = p2 - p1;
            let axis_len_sq = axis.length_squared();
            if axis_len_sq <= DEGENERATE_AXIS_SQ {
                continue;
            }

            // Slab test: between the two end-cap planes of the cone.
            let a = query - p1;
            if a.dot(axis) < 0.0 || (query - p2).dot(axis) > 0.0 {
                continue;
            }

            let projection = axis * (a.dot(axis) / axis_len_sq);
            let rejection = a - projection;
            let rejection_len = rejection.length();

            // End-cap radii at the segment's recency positions, then the
            // cross-section radius at the projected point. The radius varies
            // with the linear parameter t rather than the true slant, which
            // is the intended approximation.
            let r1 = self.config.taper.radius_at((j - 1) as f32 / denom, self.radial_multiplier);
            let r2 = self.config.taper.radius_at(j as f32 / denom, self.radial_multiplier);
            let t = projection.length() / axis_len_sq.sqrt();
            let r = r1 + (r2 - r1) * t;

            if rejection_len <= r + self.config.containment_margin {
                let scale = self.config.spring_scale.apply(rejection_len);
                let force = -self.config.spring_constant * scale * rejection.normalize_or_zero();
                // The degenerate-axis guard should make this unreachable;
                // in release a bad force degrades to a no-op instead of
                // poisoning the particle state.
                debug_assert!(force.is_finite(), "non-finite force for query {:?}", query);
                let force = if force.is_finite() { force } else { Vec3::ZERO };
                return FieldSample { projection, rejection, axis, force };
            }
        }
        FieldSample::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[Vec3]) -> WindowBuffer<Vec3> {
        let mut buf = WindowBuffer::new(points.len().max(1));
        for &p in points {
            buf.push(p);
        }
        buf
    }

    fn cylinder_config(radius: f32) -> FieldConfig {
        FieldConfig {
            taper: TaperProfile::new(radius, radius).unwrap(),
            spring_constant: 30.0,
            spring_scale: SpringScale::Proportional { gain: 0.4 },
            containment_margin: 0.0,
        }
    }

    #[test]
    fn test_taper_rejects_inverted_range() {
        assert_eq!(
            TaperProfile::new(3.0, 0.5),
            Err(ConfigError::InvalidRadiusRange { min: 3.0, max: 0.5 })
        );
    }

    #[test]
    fn test_taper_monotone_in_recency() {
        let taper = TaperProfile::new(0.5, 3.0).unwrap();
        let mut prev = f32::NEG_INFINITY;
        for i in 0..=20 {
            let r = taper.radius_at(i as f32 / 20.0, 1.0);
            assert!(r >= prev);
            prev = r;
        }
        assert_eq!(taper.radius_at(0.0, 1.0), 0.5);
        assert_eq!(taper.radius_at(1.0, 1.0), 3.0);
        // Parameter clamps instead of extrapolating.
        assert_eq!(taper.radius_at(2.0, 1.0), 3.0);
        // Multiplier scales the whole profile.
        assert_eq!(taper.radius_at(1.0, 2.0), 6.0);
    }

    #[test]
    fn test_empty_and_single_point_paths_never_contain() {
        let config = cylinder_config(100.0);
        let empty = path(&[]);
        let single = path(&[Vec3::ZERO]);
        for q in [Vec3::ZERO, Vec3::splat(1e6), Vec3::new(-3.0, 2.0, 0.5)] {
            assert_eq!(ForceField::new(&empty, config, 1.0).sample(q), FieldSample::ZERO);
            assert_eq!(ForceField::new(&single, config, 1.0).sample(q), FieldSample::ZERO);
        }
    }

    #[test]
    fn test_cylinder_containment_decomposition() {
        // Straight cylinder of radius 1 along x; query halfway, 0.5 off axis.
        let points = path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let field = ForceField::new(&points, cylinder_config(1.0), 1.0);
        let sample = field.sample(Vec3::new(5.0, 0.5, 0.0));

        assert!(!sample.is_zero());
        assert_eq!(sample.projection, Vec3::new(5.0, 0.0, 0.0));
        assert!((sample.rejection.length() - 0.5).abs() < 1e-6);
        assert_eq!(sample.axis, Vec3::new(10.0, 0.0, 0.0));
        // -k * 0.4|rej| * rej_hat = -30 * 0.2 * (0,1,0)
        assert!((sample.force - Vec3::new(0.0, -6.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_force_points_toward_centerline() {
        let points = path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let field = ForceField::new(&points, cylinder_config(1.0), 1.0);
        let sample = field.sample(Vec3::new(3.0, -0.4, 0.6));
        assert!(!sample.is_zero());
        assert!(sample.force.dot(sample.rejection) < 0.0);
    }

    #[test]
    fn test_outside_slab_or_radius_misses() {
        let points = path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let field = ForceField::new(&points, cylinder_config(1.0), 1.0);
        // Behind the older end cap, past the newer one, outside the radius.
        assert!(field.sample(Vec3::new(-0.1, 0.0, 0.0)).is_zero());
        assert!(field.sample(Vec3::new(10.1, 0.0, 0.0)).is_zero());
        assert!(field.sample(Vec3::new(5.0, 1.5, 0.0)).is_zero());
    }

    #[test]
    fn test_containment_margin_widens_the_tube() {
        let points = path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let mut config = cylinder_config(1.0);
        let tight = ForceField::new(&points, config, 1.0);
        assert!(tight.sample(Vec3::new(5.0, 1.2, 0.0)).is_zero());

        config.containment_margin = 0.25;
        let wide = ForceField::new(&points, config, 1.0);
        assert!(!wide.sample(Vec3::new(5.0, 1.2, 0.0)).is_zero());
    }

    #[test]
    fn test_taper_widest_at_newest_end() {
        // Three collinear points; the newest segment's cross-sections must
        // be wider than the oldest's at mirrored recency positions.
        let points = path(&[
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
        ]);
        let config = FieldConfig {
            taper: TaperProfile::new(0.5, 3.0).unwrap(),
            spring_constant: 30.0,
            spring_scale: SpringScale::default(),
            containment_margin: 0.0,
        };
        let field = ForceField::new(&points, config, 1.0);
        // 1.2 off axis: inside near the newest end (r -> 3.0), outside near
        // the oldest end (r -> 0.5).
        assert!(!field.sample(Vec3::new(19.0, 1.2, 0.0)).is_zero());
        assert!(field.sample(Vec3::new(1.0, 1.2, 0.0)).is_zero());
    }

    #[test]
    fn test_most_recent_segment_wins_overlap() {
        // Second segment doubles back over the first; a point inside both
        // cones must report the newest segment's axis.
        let points = path(&[
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]);
        let field = ForceField::new(&points, cylinder_config(2.0), 1.0);
        let sample = field.sample(Vec3::new(5.0, 0.3, 1.0));
        assert!(!sample.is_zero());
        assert_eq!(sample.axis, Vec3::new(-10.0, 0.0, 2.0));
    }

    #[test]
    fn test_degenerate_segment_skipped_without_nan() {
        // Duplicate newest point: zero-length segment must be skipped and
        // the older, valid segment still found.
        let points = path(&[
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ]);
        let field = ForceField::new(&points, cylinder_config(1.0), 1.0);
        let sample = field.sample(Vec3::new(5.0, 0.5, 0.0));
        assert!(!sample.is_zero());
        assert!(sample.force.is_finite());
        assert_eq!(sample.axis, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_centerline_query_has_zero_force() {
        let points = path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let field = ForceField::new(&points, cylinder_config(1.0), 1.0);
        let sample = field.sample(Vec3::new(5.0, 0.0, 0.0));
        // On the axis the rejection vanishes; no NaN from normalizing it.
        assert!(sample.force.is_finite());
        assert_eq!(sample.force, Vec3::ZERO);
    }

    #[test]
    fn test_spring_scale_variants() {
        assert_eq!(SpringScale::Proportional { gain: 0.4 }.apply(2.0), 0.8);
        assert_eq!(SpringScale::Offset { offset: 0.5 }.apply(2.0), 1.5);
        // Inside the dead zone the offset variant applies nothing.
        assert_eq!(SpringScale::Offset { offset: 0.5 }.apply(0.3), 0.0);
    }

    #[test]
    fn test_radial_multiplier_fattens_tube() {
        let points = path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        let config = cylinder_config(1.0);
        let slow = ForceField::new(&points, config, 1.0);
        let fast = ForceField::new(&points, config, 2.0);
        let q = Vec3::new(5.0, 1.5, 0.0);
        assert!(slow.sample(q).is_zero());
        assert!(!fast.sample(q).is_zero());
    }
}
