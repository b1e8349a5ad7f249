//! Release animation policies.
//!
//! After the pointer lifts, the tracker advances position and velocity one
//! display frame at a time. Two policies exist:
//!
//! - [`FrictionDecay`]: velocity decays exponentially with no target.
//! - [`AttractorSnap`]: velocity is pulled toward the nearer of two periodic
//!   attractors (integer multiples of a fixed period) until it locks on.

use crate::gesture_constants::{
    ATTRACTOR_PULL, ATTRACTOR_SLOWING, ATTRACTOR_THRESHOLD_FACTOR, DEFAULT_FRICTION,
    MIN_FLICK_VELOCITY, STOP_THRESHOLD_FACTOR,
};
use crate::geometry::Point;

/// Outcome of a single release step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayStep {
    /// Position moved; schedule another step.
    Continue,
    /// Position moved for the last time; the run is over.
    Finished,
}

/// A frame-stepped release animation.
pub trait DecaySpec {
    /// Whether a release with this initial velocity animates at all.
    fn should_start(&self, velocity: Point) -> bool;

    /// Advances `position` and `velocity` by one frame.
    fn step(&self, position: &mut Point, velocity: &mut Point) -> DecayStep;
}

/// Exponential friction decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrictionDecay {
    friction: f64,
    stop_threshold: f64,
}

impl FrictionDecay {
    pub fn new(friction: f64, multiplier: f64) -> Self {
        Self {
            friction,
            stop_threshold: STOP_THRESHOLD_FACTOR * multiplier,
        }
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn stop_threshold(&self) -> f64 {
        self.stop_threshold
    }

    /// Keeps the perceived stopping point independent of the multiplier.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.stop_threshold = STOP_THRESHOLD_FACTOR * multiplier;
    }
}

impl Default for FrictionDecay {
    fn default() -> Self {
        Self::new(DEFAULT_FRICTION, 1.0)
    }
}

impl DecaySpec for FrictionDecay {
    fn should_start(&self, velocity: Point) -> bool {
        velocity.max_abs() > MIN_FLICK_VELOCITY
    }

    fn step(&self, position: &mut Point, velocity: &mut Point) -> DecayStep {
        *velocity = *velocity * self.friction;
        *position += *velocity;

        if velocity.max_abs() > self.stop_threshold {
            DecayStep::Continue
        } else {
            DecayStep::Finished
        }
    }
}

/// Snap-to-period settling along the x axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttractorSnap {
    width: f64,
    threshold: f64,
    pull: f64,
}

impl AttractorSnap {
    /// `width` must be finite and positive; the builder validates this.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            threshold: ATTRACTOR_THRESHOLD_FACTOR * width,
            pull: ATTRACTOR_PULL * width,
        }
    }

    /// Both the speed and the distance threshold used for locking on.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The attractors directly below and above `position`.
    pub fn nearest_attractors(&self, position: f64) -> (f64, f64) {
        let lower = (position / self.width).floor() * self.width;
        (lower, lower + self.width)
    }
}

impl DecaySpec for AttractorSnap {
    fn should_start(&self, _velocity: Point) -> bool {
        // A stationary release still has to settle onto an attractor.
        true
    }

    fn step(&self, position: &mut Point, velocity: &mut Point) -> DecayStep {
        let start_velocity = velocity.x;
        let midpoint = position.x + start_velocity / 2.0;
        let (attractor0, attractor1) = self.nearest_attractors(midpoint);
        let distance0 = midpoint - attractor0;
        let distance1 = attractor1 - midpoint;

        let acceleration = self.pull * ((distance0 - distance1) / self.width);
        velocity.x = (start_velocity + acceleration) * ATTRACTOR_SLOWING;
        position.x += velocity.x;

        // Lock-on compares the step's input velocity with the integrated
        // position.
        let target = if start_velocity > -self.threshold && position.x < attractor0 + self.threshold
        {
            Some(attractor0)
        } else if start_velocity < self.threshold && position.x > attractor1 - self.threshold {
            Some(attractor1)
        } else {
            None
        };

        match target {
            Some(attractor) => {
                position.x = attractor;
                velocity.x = 0.0;
                DecayStep::Finished
            }
            None => DecayStep::Continue,
        }
    }
}

/// Release policy chosen at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecayPolicy {
    Friction(FrictionDecay),
    Attractor(AttractorSnap),
}

impl DecayPolicy {
    pub fn set_multiplier(&mut self, multiplier: f64) {
        if let DecayPolicy::Friction(decay) = self {
            decay.set_multiplier(multiplier);
        }
    }

    pub fn is_attractor(&self) -> bool {
        matches!(self, DecayPolicy::Attractor(_))
    }
}

impl DecaySpec for DecayPolicy {
    fn should_start(&self, velocity: Point) -> bool {
        match self {
            DecayPolicy::Friction(decay) => decay.should_start(velocity),
            DecayPolicy::Attractor(snap) => snap.should_start(velocity),
        }
    }

    fn step(&self, position: &mut Point, velocity: &mut Point) -> DecayStep {
        match self {
            DecayPolicy::Friction(decay) => decay.step(position, velocity),
            DecayPolicy::Attractor(snap) => snap.step(position, velocity),
        }
    }
}
