//! Tracker construction options.

use crate::decay_spec::{AttractorSnap, DecayPolicy, FrictionDecay};
use crate::error::ConfigError;
use crate::gesture_constants::{DEFAULT_FRICTION, DEFAULT_MULTIPLIER};
use crate::geometry::{Axes, Point};

/// Options recognized when building a tracker.
///
/// With the `serde` feature the field names follow the host-facing option
/// names (`multiplier`, `friction`, `initialValues`, `axes`, `width`,
/// `paused`) and every field is optional.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TrackerConfig {
    /// Gain applied to raw pointer displacement.
    pub multiplier: f64,
    /// Velocity retained per free-decay step. Ignored in attractor mode.
    pub friction: f64,
    /// Starting position; y is ignored in single-axis mode.
    pub initial_values: [f64; 2],
    pub axes: Axes,
    /// Attractor period. Its presence switches to snap mode.
    pub width: Option<f64>,
    /// Start with new drags suppressed.
    pub paused: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            friction: DEFAULT_FRICTION,
            initial_values: [0.0, 0.0],
            axes: Axes::default(),
            width: None,
            paused: false,
        }
    }
}

impl TrackerConfig {
    pub fn initial_position(&self) -> Point {
        self.axes
            .constrain(Point::new(self.initial_values[0], self.initial_values[1]))
    }

    /// Checks the options and picks the release policy they describe.
    pub fn decay_policy(&self) -> Result<DecayPolicy, ConfigError> {
        match self.width {
            None => Ok(DecayPolicy::Friction(FrictionDecay::new(
                self.friction,
                self.multiplier,
            ))),
            Some(width) if !(width.is_finite() && width > 0.0) => {
                Err(ConfigError::InvalidAttractorWidth(width))
            }
            Some(_) if self.axes == Axes::Two => Err(ConfigError::AttractorRequiresSingleAxis),
            Some(width) => Ok(DecayPolicy::Attractor(AttractorSnap::new(width))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_friction_decay() {
        let config = TrackerConfig::default();
        assert_eq!(config.multiplier, 1.0);
        assert_eq!(config.friction, 0.92);
        assert_eq!(
            config.decay_policy(),
            Ok(DecayPolicy::Friction(FrictionDecay::new(0.92, 1.0)))
        );
    }

    #[test]
    fn width_selects_attractor_mode() {
        let config = TrackerConfig {
            axes: Axes::One,
            width: Some(300.0),
            ..TrackerConfig::default()
        };
        assert_eq!(
            config.decay_policy(),
            Ok(DecayPolicy::Attractor(AttractorSnap::new(300.0)))
        );
    }

    #[test]
    fn attractor_rejects_bad_width_and_two_axes() {
        let mut config = TrackerConfig {
            axes: Axes::One,
            width: Some(-4.0),
            ..TrackerConfig::default()
        };
        assert_eq!(
            config.decay_policy(),
            Err(ConfigError::InvalidAttractorWidth(-4.0))
        );

        config.width = Some(300.0);
        config.axes = Axes::Two;
        assert_eq!(
            config.decay_policy(),
            Err(ConfigError::AttractorRequiresSingleAxis)
        );
    }

    #[test]
    fn single_axis_ignores_initial_y() {
        let config = TrackerConfig {
            axes: Axes::One,
            initial_values: [12.0, 40.0],
            ..TrackerConfig::default()
        };
        assert_eq!(config.initial_position(), Point::new(12.0, 0.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_host_option_names() {
        let config: TrackerConfig = serde_json::from_str(
            r#"{ "multiplier": 2, "initialValues": [5, 6], "axes": "one", "width": 250 }"#,
        )
        .expect("valid options");

        assert_eq!(config.multiplier, 2.0);
        assert_eq!(config.friction, DEFAULT_FRICTION);
        assert_eq!(config.initial_values, [5.0, 6.0]);
        assert_eq!(config.axes, Axes::One);
        assert_eq!(config.width, Some(250.0));
        assert!(!config.paused);
    }
}
