//! Error types shared by every pipeline stage.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FluidError>;

/// An error raised while normalizing, arranging, or compiling a score.
///
/// Every error aborts the current invocation; nothing is partially applied.
#[derive(Debug, Error)]
pub enum FluidError {
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("invalid note name: {0}")]
    InvalidNoteName(String),

    #[error("structure references section {index}, but only {len} sections exist")]
    StructureIndex { index: usize, len: usize },

    #[error("structure `{0}` could not be found")]
    StructureNotFound(String),

    #[error("malformed structure: {0}")]
    MalformedStructure(String),

    #[error("malformed note at position {index}: {reason}")]
    MalformedNote { index: usize, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("cannot encode message: {0}")]
    Encode(String),
}

impl FluidError {
    pub fn malformed_structure(message: impl Into<String>) -> Self {
        Self::MalformedStructure(message.into())
    }

    pub fn malformed_note(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedNote {
            index,
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml::Error> for FluidError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for FluidError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
