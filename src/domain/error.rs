//! Scene Error Types
//!
//! Everything that can fail while building or running the scene returns
//! `Result<T, SceneError>`. Configuration errors are raised before any body
//! exists; allocation errors from the physics world are fatal to the cloth
//! being built and are propagated untouched.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum SceneError {
    /// A configuration value is out of range.
    InvalidConfiguration {
        reason: String,
    },
    /// Configuration JSON could not be parsed.
    ConfigParse {
        message: String,
    },
    /// The physics world refused an allocation (too many bodies/constraints).
    CapacityExceeded {
        resource: &'static str,
        limit: usize,
    },
    /// A body handle does not resolve (never created or already released).
    InvalidBody {
        index: u32,
    },
    /// A distance constraint was requested between unusable endpoints.
    InvalidConstraint {
        reason: &'static str,
    },
    /// The cloth assembly was already torn down.
    Disposed,
}

impl SceneError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        SceneError::InvalidConfiguration { reason: reason.into() }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => write!(f, "invalid configuration: {reason}"),
            Self::ConfigParse { message } => write!(f, "config parse error: {message}"),
            Self::CapacityExceeded { resource, limit } => {
                write!(f, "{resource} capacity exceeded (limit={limit})")
            }
            Self::InvalidBody { index } => write!(f, "body handle {index} does not resolve"),
            Self::InvalidConstraint { reason } => write!(f, "invalid constraint: {reason}"),
            Self::Disposed => write!(f, "already disposed"),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::ConfigParse { message: e.to_string() }
    }
}
