//! Error handling for idstore configuration.

use thiserror::Error;

/// Result type alias using the idstore core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing.
    #[error("missing configuration: {0}")]
    Missing(String),

    /// A setting is present but unusable.
    #[error("invalid configuration: {field}: {reason}")]
    Invalid {
        /// Name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl Error {
    /// Creates an invalid-setting error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
