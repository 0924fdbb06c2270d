//! Dumps the tube's debug geometry for a short recorded path.
//!
//! Shows what a visualization host gets from the read-only snapshot
//! accessors: zone anchors for prop placement plus per-segment rings it
//! could draw as circles.
//!
//! Run with: cargo run --example path_rings

use windstream::prelude::*;

fn main() {
    let mut stream = WindStream::builder()
        .history_capacity(50)
        .radius_range(0.5, 3.0)
        .build()
        .expect("valid config");

    // A quarter circle of emitter motion.
    for i in 0..120 {
        let theta = i as f32 * 0.015;
        stream.append(Vec3::new(6.0 * theta.cos(), 0.0, 6.0 * theta.sin()));
    }

    println!("path points: {}", stream.path().len());
    for (i, anchor) in stream.path().zone_anchors(5).iter().enumerate() {
        println!("zone {}: ({:.2}, {:.2}, {:.2})", i, anchor.x, anchor.y, anchor.z);
    }

    for (i, ring) in stream.rings().iter().enumerate() {
        println!(
            "ring {:>2}: center=({:.2}, {:.2}, {:.2})  r={:.2}",
            i, ring.center.x, ring.center.y, ring.center.z, ring.radius
        );
        if i == 0 {
            for p in ring.circle_points(8) {
                println!("    circle pt ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
            }
        }
    }
}
