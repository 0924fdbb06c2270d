//! Frame timing for hosts driving the tick loop.
//!
//! The stream itself takes `dt` as a plain argument and is correct for any
//! positive value; [`Time`] is the convenience source of truth for hosts
//! that tick at real-time rates. Uses `std::time` only.
//!
//! # Example
//!
//! ```no_run
//! use windstream::time::Time;
//!
//! let mut time = Time::new();
//! loop {
//!     let (elapsed, dt) = time.update();
//!     // stream.append(...); stream.step_all(..., dt);
//!     if elapsed > 5.0 {
//!         break;
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

/// Wall-clock tick timer with optional fixed-delta and time-scale overrides.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// FPS recomputed every `FPS_INTERVAL`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    /// Fixed delta for deterministic stepping, overriding wall time.
    fixed_delta: Option<f32>,
    /// Multiplier on delta and elapsed time (1.0 = real time).
    time_scale: f32,
}

const FPS_INTERVAL: Duration = Duration::from_millis(500);

impl Time {
    /// Create a timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance the timer by one frame. Returns `(elapsed, delta)` seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta) * self.time_scale;
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32() * self.time_scale;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= FPS_INTERVAL {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since the last frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Seconds since the timer started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames since the timer started.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, recomputed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Use a fixed delta regardless of wall time; `None` restores real
    /// frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set the time scale (clamped at 0; 0.5 = slow motion, 2.0 = double).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
