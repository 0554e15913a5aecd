//! Error types for configuration loading.
//!
//! The frame simulation itself is infallible; only the outer surfaces that
//! touch the filesystem or parse user data can fail.

use std::io;
use std::path::PathBuf;

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
