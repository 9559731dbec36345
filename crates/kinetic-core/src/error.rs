//! Typed errors for the parse boundaries of the core.
//!
//! The simulation itself is total; these only surface where text from the
//! outside (environment, UI, gesture transport) is turned into core types.

use thiserror::Error;

/// A color string that is not `#rgb` or `#rrggbb` hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {0:?}, expected #rgb or #rrggbb")]
pub struct ColorParseError(pub String);

/// A hand state token outside IDLE/OPEN/CLOSED/PINCH.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hand state {0:?}")]
pub struct HandStateParseError(pub String);

/// Reasons a message from the gesture transport is dropped.
#[derive(Debug, Error)]
pub enum GestureParseError {
    #[error("empty gesture message")]
    Empty,
    #[error("malformed gesture message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected function call {0:?}")]
    UnknownFunction(String),
    #[error(transparent)]
    State(#[from] HandStateParseError),
}

/// Invalid session configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{key}: expected a positive particle count, got {value:?}")]
    ParticleCount { key: &'static str, value: String },
    #[error("{key}: {source}")]
    Color {
        key: &'static str,
        #[source]
        source: ColorParseError,
    },
    #[error("{key}: unknown kinematics profile {value:?}")]
    Profile { key: &'static str, value: String },
    #[error("{key}: expected a positive frame rate, got {value:?}")]
    ReferenceFps { key: &'static str, value: String },
}
