//! Per-particle velocity/position integration.
//!
//! Velocity is advanced with a two-stage midpoint (RK2) scheme: the field
//! is sampled at the particle's position for a half-step, then re-sampled
//! at the trial position for the corrector. The stiff spring term makes a
//! single-stage (Euler) update drift badly at playable timesteps; the
//! midpoint re-sample bounds the local truncation error instead.
//!
//! On a containing sample the integrator additionally rotates the radial
//! offset a few degrees around the segment axis and carries the particle
//! one segment forward. That position correction is a deliberate visual
//! choice (it makes the stream swirl and drift along the path) rather than
//! physics, and it is skipped entirely when the particle is outside the
//! field.
//!
//! The integrator holds no state of its own across frames; a particle's
//! stored position, velocity and lifetime are the whole story.

use crate::field::ForceField;
use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

/// Kinematic state of one particle.
///
/// Owned by the host's particle storage and mutated in place by
/// [`Integrator::step`]. `#[repr(C)]` and `Pod` so hosts can bulk-copy
/// whole particle arrays across an FFI or GPU boundary.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// World position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Remaining lifetime in seconds; the field tops this up while the
    /// particle rides the stream.
    pub remaining_lifetime: f32,
}

impl Particle {
    /// A particle at rest at `position` with one second of life.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            remaining_lifetime: 1.0,
        }
    }
}

/// Two-stage midpoint integrator with the swirl correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    /// Angle in radians by which the radial offset is rotated around the
    /// segment axis on a containing sample.
    pub swirl_angle: f32,
    /// Upper bound on a single tick's lifetime top-up.
    pub lifetime_cap: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            swirl_angle: 10f32.to_radians(),
            lifetime_cap: 1.0,
        }
    }
}

impl Integrator {
    /// Create an integrator with the given swirl angle (radians) and the
    /// default lifetime cap.
    pub fn new(swirl_angle: f32) -> Self {
        Self { swirl_angle, ..Self::default() }
    }

    /// Advance one particle by `dt` seconds against the given field.
    ///
    /// Returns whether the corrector sample found the particle inside the
    /// field. Correct for any `dt > 0`; large steps only degrade the RK2
    /// error bound, they do not break the update.
    pub fn step(&self, field: &ForceField<'_>, particle: &mut Particle, dt: f32) -> bool {
        let half = dt * 0.5;

        // Stage 1: half-step the velocity on the force at the current
        // position, then form the midpoint trial position.
        let force = field.sample(particle.position).force;
        particle.velocity += force * half;
        let trial = particle.position + particle.velocity * half;

        // Stage 2: corrector sample at the trial position.
        let sample = field.sample(trial);
        particle.velocity += sample.force * half;

        let contained = !sample.is_zero();
        if contained {
            // Swirl: rotate the radial offset around the segment axis and
            // carry the particle one segment along the path. The axis is
            // non-degenerate whenever the sample is (the field skips
            // zero-length segments).
            let rotation = Quat::from_axis_angle(sample.axis.normalize(), self.swirl_angle);
            let rotated = rotation * sample.rejection;
            particle.position = particle.position - sample.rejection + rotated + sample.axis;

            // Riding the stream tops up lifetime, but never by more than
            // the cap and never backwards.
            particle.remaining_lifetime +=
                (particle.remaining_lifetime + dt).min(self.lifetime_cap);
        }

        particle.position += particle.velocity * dt;
        contained
    }
}
