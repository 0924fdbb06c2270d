//! Error types for windstream.
//!
//! This module provides error types for configuration validation and
//! window-buffer index checks. Everything else in the crate is a bounded,
//! deterministic computation that cannot fail at runtime; degenerate
//! geometry (zero-length segments, empty paths) is handled locally as
//! "no containment" and never surfaces as an error.

use std::fmt;

/// Errors that can occur when validating stream configuration.
///
/// All variants are caught at construction time by
/// [`WindStreamBuilder::build`](crate::stream::WindStreamBuilder::build);
/// a successfully built [`WindStream`](crate::WindStream) cannot hit them
/// during normal operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Path history capacity was zero.
    ZeroCapacity,
    /// Minimum point spacing was zero or negative.
    NonPositiveSpacing(f32),
    /// Taper radius range was inverted (`min > max`).
    InvalidRadiusRange {
        /// Configured minimum radius.
        min: f32,
        /// Configured maximum radius.
        max: f32,
    },
    /// Baseline travel speed was zero or negative, which would make the
    /// radial multiplier undefined.
    NonPositiveBaselineSpeed(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => {
                write!(f, "Path history capacity must be at least 1")
            }
            ConfigError::NonPositiveSpacing(s) => {
                write!(f, "Minimum point spacing must be positive, got {}", s)
            }
            ConfigError::InvalidRadiusRange { min, max } => {
                write!(f, "Taper radius range is inverted: min {} > max {}", min, max)
            }
            ConfigError::NonPositiveBaselineSpeed(s) => {
                write!(f, "Baseline speed must be positive, got {}", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when indexing a [`WindowBuffer`](crate::WindowBuffer).
///
/// The checked accessors return this instead of silently wrapping an
/// out-of-range index back into the live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Index was at or beyond the buffer's current logical length.
    IndexOutOfRange {
        /// The requested recency index.
        index: usize,
        /// The buffer's logical length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for window buffer of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for BufferError {}
