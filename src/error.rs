// src/error.rs

//! Error types shared by the catalog, the lifecycle and font handles.

use std::io;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FontError>;

/// Why a font source could not be turned into a usable face.
#[derive(Error, Debug)]
pub enum LoadFailure {
    /// The file is missing or could not be read.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The bytes were read but are not a face the backend understands.
    #[error("unsupported or corrupt font data: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum FontError {
    /// A catalog lookup or font construction happened before `init()`.
    #[error("font subsystem not initialized")]
    NotInitialized,

    /// A font file (or in-memory font) could not be loaded.
    #[error("failed to load font '{source_name}': {reason}")]
    FontLoad {
        source_name: String,
        #[source]
        reason: LoadFailure,
    },

    /// Non-positive point size, malformed colour and similar caller mistakes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FontError {
    pub(crate) fn load(source_name: impl Into<String>, reason: impl Into<LoadFailure>) -> Self {
        FontError::FontLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        FontError::FontLoad {
            source_name: source_name.into(),
            reason: LoadFailure::Parse(message.into()),
        }
    }

    /// True when the error is a load failure caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FontError::FontLoad {
                reason: LoadFailure::Io(e),
                ..
            } if e.kind() == io::ErrorKind::NotFound
        )
    }
}
