//! Shared gesture constants for drag tracking and release physics.
//!
//! Positions are in whatever unit the host feeds in (usually CSS pixels);
//! times are in milliseconds.

/// Only samples younger than this (relative to the newest one) take part in
/// the release velocity estimate.
pub const SAMPLE_WINDOW_MS: f64 = 100.0;

/// Nominal frame interval used to express release velocity in "units per frame".
///
/// Decay steps run once per display frame, so the velocity handed to the decay
/// policy is the displacement the pointer would cover in one ~15 ms frame.
pub const FRAME_UNIT_MS: f64 = 15.0;

/// Default friction applied to the velocity on every free-decay step.
pub const DEFAULT_FRICTION: f64 = 0.92;

/// Default gain applied to raw pointer displacement.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Free decay only starts when the release velocity exceeds this on some axis.
pub const MIN_FLICK_VELOCITY: f64 = 1.0;

/// Free decay stops once every axis falls to `STOP_THRESHOLD_FACTOR * multiplier`.
pub const STOP_THRESHOLD_FACTOR: f64 = 0.3;

/// Attractor speed and distance thresholds, as a fraction of the attractor period.
pub const ATTRACTOR_THRESHOLD_FACTOR: f64 = 0.04;

/// Velocity retained on every attractor settle step.
pub const ATTRACTOR_SLOWING: f64 = 0.92;

/// Strength of the pull toward the nearer attractor, as a fraction of the
/// period per step.
pub const ATTRACTOR_PULL: f64 = 0.02;
