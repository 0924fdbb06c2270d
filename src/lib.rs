//! # windstream - wind-path force field for particle streams
//!
//! A real-time geometric force field that steers independent particles
//! along the trailing path of a moving emitter. The path is the recent
//! history of emitter positions, modeled as a chain of truncated cones
//! whose radius tapers with recency; particles inside the tube feel a
//! spring pull toward the centerline, a swirl around the path axis, and a
//! drive along it.
//!
//! ## Quick Start
//!
//! ```
//! use windstream::prelude::*;
//!
//! let mut stream = WindStream::builder()
//!     .history_capacity(50)
//!     .min_spacing(0.1)
//!     .radius_range(0.5, 3.0)
//!     .spring_constant(30.0)
//!     .build()
//!     .expect("valid config");
//!
//! let mut particles = vec![Particle::at(Vec3::new(0.5, 0.2, 0.0))];
//!
//! // Once per tick: record the emitter pose, then step the particles
//! // against the frozen path snapshot.
//! stream.append(Vec3::ZERO);
//! stream.append(Vec3::new(1.0, 0.0, 0.0));
//! let riding = stream.step_all(&mut particles, 1.0 / 60.0);
//! assert_eq!(riding, 1);
//! ```
//!
//! ## Core Concepts
//!
//! ### Path history
//!
//! [`PathTracker`] records emitter positions into a fixed-capacity
//! [`WindowBuffer`], decimated by a minimum spacing so the polyline stays
//! well conditioned. Old points age out in O(1) as new ones arrive; index
//! 0 is always the oldest retained point, `len - 1` the newest.
//!
//! ### The tube
//!
//! Consecutive path points span truncated cones. The [`TaperProfile`] maps
//! recency to radius - narrow at the old trailing end, widest right behind
//! the emitter - and the whole tube scales with the emitter's speed ratio.
//!
//! ### Sampling
//!
//! [`ForceField::sample`] tests a query point against segments newest to
//! oldest and returns a [`FieldSample`]: the axial projection, the radial
//! rejection, the segment axis and the derived spring force. The most
//! recent containing segment wins; a miss returns the zero sample.
//!
//! ### Integration
//!
//! [`Integrator::step`] advances a [`Particle`] with a two-stage midpoint
//! (RK2) scheme - the field is re-sampled at a half-step trial position to
//! keep the stiff spring term stable - then applies the swirl/drive
//! position correction and lifetime top-up when the particle rides the
//! stream.
//!
//! ## What this crate is not
//!
//! No rendering, no input handling, no particle storage: the host owns
//! the particle array and any drawing. The crate only turns positions into
//! forces and updated kinematic state, plus read-only path geometry
//! ([`PathRing`]) for hosts that want to visualize the tube.

pub mod buffer;
pub mod error;
pub mod field;
pub mod integrator;
pub mod path;
pub mod stream;
pub mod time;

pub use buffer::WindowBuffer;
pub use bytemuck;
pub use error::{BufferError, ConfigError};
pub use field::{FieldConfig, FieldSample, ForceField, SpringScale, TaperProfile};
pub use glam::{Quat, Vec3};
pub use integrator::{Integrator, Particle};
pub use path::{PathRing, PathTracker};
pub use stream::{WindStream, WindStreamBuilder};

/// Convenient re-exports for common usage.
///
/// ```
/// use windstream::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::WindowBuffer;
    pub use crate::error::{BufferError, ConfigError};
    pub use crate::field::{FieldConfig, FieldSample, ForceField, SpringScale, TaperProfile};
    pub use crate::integrator::{Integrator, Particle};
    pub use crate::path::{PathRing, PathTracker};
    pub use crate::stream::{WindStream, WindStreamBuilder};
    pub use crate::time::Time;
    pub use crate::{Quat, Vec3};
}
