use thiserror::Error;

/// Reasons a tracker cannot be constructed.
///
/// Construction is the only fallible step; once a tracker exists, malformed
/// input is ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("an update callback is required")]
    MissingUpdateCallback,
    #[error("attractor width must be a positive finite number, got {0}")]
    InvalidAttractorWidth(f64),
    #[error("attractor mode drives a single axis; two axes were requested")]
    AttractorRequiresSingleAxis,
}
