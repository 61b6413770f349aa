//! Error types
//!
//! Nothing in the core retries: every failure here is either fatal to the
//! operation (grid construction, settings) or isolated and reported
//! (event handlers).

use std::path::PathBuf;

use thiserror::Error;

/// Grid construction failures. A grid is either fully built or not at all.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("grid dimensions {width}x{height} exceed the addressable range")]
    Oversized { width: usize, height: usize },

    #[error("cell initializer failed at ({x}, {y}): {reason}")]
    CellInit { x: i32, y: i32, reason: String },
}

/// Failure reported by an event handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Settings loading and validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
