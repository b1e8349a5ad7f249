//! Pointer drag tracking with flick and snap physics.
//!
//! [`DragTracker`] turns a stream of normalized pointer events into one or
//! two continuously updated position values. While a pointer is held the
//! displacement is applied at most once per display frame; on release the
//! tracker either coasts with friction or settles onto the nearest multiple of
//! a fixed period.
//!
//! The host supplies three capabilities: a [`FrameScheduler`], a
//! [`PointerSource`] that manages native listeners, and the update callback.

pub mod config;
pub mod decay_spec;
pub mod error;
pub mod frame_clock;
pub mod geometry;
pub mod gesture_constants;
pub mod input;
pub mod platform;
pub mod tracker;
pub mod velocity_tracker;

pub use config::TrackerConfig;
pub use decay_spec::{AttractorSnap, DecayPolicy, DecaySpec, DecayStep, FrictionDecay};
pub use error::ConfigError;
pub use frame_clock::FrameClock;
pub use geometry::{Axes, Point};
pub use input::{PointerEvent, PointerEventKind, PointerKey};
pub use platform::{Clock, FrameScheduler, NullSource, PointerSource, SystemClock};
pub use tracker::{DragTracker, Phase, TrackerBuilder, UpdateCallback};
pub use velocity_tracker::{PointerSample, SampleWindow};

pub mod prelude {
    pub use crate::{
        Axes, DragTracker, FrameScheduler, Phase, Point, PointerEvent, PointerEventKind,
        PointerKey, PointerSource, TrackerConfig,
    };
}
