//! Wind stream driver.
//!
//! [`WindStream`] ties the pieces together for one emitter: it owns the
//! path tracker, the field configuration and the integrator, and exposes
//! the per-tick surface the host calls. Use the builder to configure,
//! then drive it once per simulation tick:
//!
//! ```
//! use windstream::{Particle, WindStream};
//! use glam::Vec3;
//!
//! let mut stream = WindStream::builder()
//!     .history_capacity(50)
//!     .min_spacing(0.1)
//!     .radius_range(0.5, 3.0)
//!     .spring_constant(30.0)
//!     .build()
//!     .unwrap();
//!
//! let mut particles = vec![Particle::at(Vec3::new(0.4, 0.2, 0.0))];
//! // Each tick: record the emitter pose first, then step the particles
//! // against the frozen snapshot.
//! stream.append(Vec3::ZERO);
//! stream.append(Vec3::new(1.0, 0.0, 0.0));
//! let riding = stream.step_all(&mut particles, 1.0 / 60.0);
//! assert_eq!(riding, 1);
//! ```
//!
//! The append-then-sample ordering is enforced by borrows rather than
//! locks: [`WindStream::append`] takes `&mut self`, while [`field`](WindStream::field),
//! [`sample`](WindStream::sample) and [`step_all`](WindStream::step_all)
//! take `&self` and may run concurrently over a fixed snapshot. Multiple
//! emitters each own an independent `WindStream` with no shared state.

use crate::error::ConfigError;
use crate::field::{FieldConfig, FieldSample, ForceField, SpringScale, TaperProfile};
use crate::integrator::{Integrator, Particle};
use crate::path::{PathRing, PathTracker};
use glam::Vec3;

/// A wind-path force field for one emitter stream.
///
/// Created through [`WindStream::builder`]; see the module docs for the
/// per-tick protocol.
#[derive(Clone, Debug)]
pub struct WindStream {
    tracker: PathTracker,
    config: FieldConfig,
    integrator: Integrator,
    baseline_speed: f32,
    radial_multiplier: f32,
}

impl WindStream {
    /// Start configuring a stream.
    pub fn builder() -> WindStreamBuilder {
        WindStreamBuilder::default()
    }

    /// Record the emitter's position for this tick.
    ///
    /// Call once per tick before any sampling. The point is kept only if
    /// the emitter has moved past the minimum spacing; returns whether it
    /// was kept.
    pub fn append(&mut self, position: Vec3) -> bool {
        self.tracker.append(position)
    }

    /// Derive the radial multiplier from the emitter's current speed
    /// relative to the configured baseline. Faster travel widens the tube.
    pub fn set_speed(&mut self, current_speed: f32) {
        self.radial_multiplier = current_speed / self.baseline_speed;
    }

    /// Set the radial multiplier directly.
    pub fn set_radial_multiplier(&mut self, multiplier: f32) {
        self.radial_multiplier = multiplier;
    }

    /// Current radial multiplier.
    #[inline]
    pub fn radial_multiplier(&self) -> f32 {
        self.radial_multiplier
    }

    /// Read-only sampler over this tick's path snapshot.
    ///
    /// Cheap to construct; build it after the tick's [`append`](Self::append)
    /// and share it freely across particles (or threads).
    pub fn field(&self) -> ForceField<'_> {
        ForceField::new(self.tracker.points(), self.config, self.radial_multiplier)
    }

    /// Sample the field once at `query`.
    pub fn sample(&self, query: Vec3) -> FieldSample {
        self.field().sample(query)
    }

    /// Integrate one particle by `dt` against this tick's snapshot.
    /// Returns whether the particle was inside the field.
    pub fn step(&self, particle: &mut Particle, dt: f32) -> bool {
        self.integrator.step(&self.field(), particle, dt)
    }

    /// Integrate every particle by `dt`, returning how many were inside
    /// the field this tick (the stream's per-frame activity count).
    pub fn step_all(&self, particles: &mut [Particle], dt: f32) -> usize {
        let field = self.field();
        particles
            .iter_mut()
            .map(|p| self.integrator.step(&field, p, dt))
            .filter(|&riding| riding)
            .count()
    }

    /// The path tracker, for visualization hosts.
    #[inline]
    pub fn path(&self) -> &PathTracker {
        &self.tracker
    }

    /// Midpoint cross-section rings of the current tube, for debug drawing.
    pub fn rings(&self) -> Vec<PathRing> {
        self.tracker.rings(&self.config.taper, self.radial_multiplier)
    }

    /// The field configuration in force.
    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

/// Builder for [`WindStream`].
///
/// Defaults: capacity 50, spacing 0.1, radii 0.5 to 3.0, spring constant
/// 30, proportional scale 0.4, particle radius 0.25, swirl angle 10
/// degrees.
#[derive(Clone, Debug)]
pub struct WindStreamBuilder {
    history_capacity: usize,
    min_spacing: f32,
    min_radius: f32,
    max_radius: f32,
    spring_constant: f32,
    spring_scale: SpringScale,
    particle_radius: f32,
    swirl_angle: f32,
    lifetime_cap: f32,
    baseline_speed: f32,
}

impl Default for WindStreamBuilder {
    fn default() -> Self {
        Self {
            history_capacity: PathTracker::DEFAULT_CAPACITY,
            min_spacing: PathTracker::DEFAULT_MIN_SPACING,
            min_radius: 0.5,
            max_radius: 3.0,
            spring_constant: 30.0,
            spring_scale: SpringScale::default(),
            particle_radius: 0.25,
            swirl_angle: 10f32.to_radians(),
            lifetime_cap: 1.0,
            baseline_speed: 1.0,
        }
    }
}

impl WindStreamBuilder {
    /// Number of emitter positions retained in the path history.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Minimum distance the emitter must move before a new path point is
    /// recorded.
    pub fn min_spacing(mut self, spacing: f32) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Tube radius at the oldest (`min`) and newest (`max`) end of the path.
    pub fn radius_range(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    /// Spring constant pulling particles toward the path centerline.
    pub fn spring_constant(mut self, k: f32) -> Self {
        self.spring_constant = k;
        self
    }

    /// Distance scaling inside the spring formula.
    pub fn spring_scale(mut self, scale: SpringScale) -> Self {
        self.spring_scale = scale;
        self
    }

    /// Particle extent added to the cone radius in the containment test.
    pub fn particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    /// Swirl rotation per step, in radians.
    pub fn swirl_angle(mut self, radians: f32) -> Self {
        self.swirl_angle = radians;
        self
    }

    /// Upper bound on the per-tick lifetime top-up.
    pub fn lifetime_cap(mut self, cap: f32) -> Self {
        self.lifetime_cap = cap;
        self
    }

    /// Baseline emitter speed against which [`WindStream::set_speed`]
    /// derives the radial multiplier.
    pub fn baseline_speed(mut self, speed: f32) -> Self {
        self.baseline_speed = speed;
        self
    }

    /// Validate the configuration and build the stream.
    pub fn build(self) -> Result<WindStream, ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.min_spacing <= 0.0 {
            return Err(ConfigError::NonPositiveSpacing(self.min_spacing));
        }
        if self.baseline_speed <= 0.0 {
            return Err(ConfigError::NonPositiveBaselineSpeed(self.baseline_speed));
        }
        let taper = TaperProfile::new(self.min_radius, self.max_radius)?;

        Ok(WindStream {
            tracker: PathTracker::new(self.history_capacity, self.min_spacing),
            config: FieldConfig {
                taper,
                spring_constant: self.spring_constant,
                spring_scale: self.spring_scale,
                containment_margin: self.particle_radius,
            },
            integrator: Integrator {
                swirl_angle: self.swirl_angle,
                lifetime_cap: self.lifetime_cap,
            },
            baseline_speed: self.baseline_speed,
            radial_multiplier: 1.0,
        })
    }
}
