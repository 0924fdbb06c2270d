//! Headless wind-tunnel demo.
//!
//! Flies an emitter along a helix, scatters a particle cloud around the
//! origin, and ticks the stream at a fixed 60 Hz for a few simulated
//! seconds, printing how many particles are riding the stream each second.
//!
//! Run with: cargo run --example wind_tunnel

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use windstream::prelude::*;

fn main() {
    let mut stream = WindStream::builder()
        .history_capacity(50)
        .min_spacing(0.1)
        .radius_range(0.5, 3.0)
        .spring_constant(30.0)
        .particle_radius(0.25)
        .baseline_speed(3.0)
        .build()
        .expect("valid config");

    let mut rng = StdRng::seed_from_u64(42);
    let mut particles: Vec<Particle> = (0..2_000)
        .map(|_| {
            Particle::at(Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-10.0..10.0),
            ))
        })
        .collect();

    let mut time = Time::new();
    time.set_fixed_delta(Some(1.0 / 60.0));

    let mut emitter = Vec3::ZERO;
    for frame in 0u32.. {
        let (_, dt) = time.update();

        // Emitter flies a helix, slightly faster on the climbs.
        let theta = frame as f32 * 0.03;
        let speed = 3.0 + theta.sin().max(0.0);
        let heading = Vec3::new(-theta.sin(), 0.1 * (theta * 2.0).cos(), theta.cos()).normalize();
        emitter += heading * speed * dt;
        stream.append(emitter);
        stream.set_speed(speed);

        let riding = stream.step_all(&mut particles, dt);

        if frame % 60 == 0 {
            println!(
                "t={:>5.1}s  path_points={:>2}  riding={:>4}  multiplier={:.2}",
                frame as f32 / 60.0,
                stream.path().len(),
                riding,
                stream.radial_multiplier(),
            );
        }
        if frame >= 600 {
            break;
        }
    }
}
