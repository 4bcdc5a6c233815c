use thiserror::Error;

/// Rejected configuration. Raised before anything is drawn.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unknown {kind} `{value}` (expected one of: {expected})")]
    UnknownChoice { kind: &'static str, value: String, expected: String },

    #[error("density must lie within [0, 1], got {0}")]
    Density(f64),

    #[error("width must be at least {min} columns, got {width}")]
    Width { width: u16, min: u16 },

    #[error("{name} must be a finite number of seconds {bound}, got {value}")]
    Interval { name: &'static str, bound: &'static str, value: f64 },

    #[error("invalid key binding `{key}`: {reason}")]
    KeyBinding { key: String, reason: String },

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}
