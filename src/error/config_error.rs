//! Top-level error type and configuration errors.

use thiserror::Error;

use super::ValidationError;

/// Misuse of the validation API.
///
/// These are bugs in how a schema was put together rather than bad input, so
/// they propagate straight to the caller: array and dict validators do not
/// collect them and schemas in collect-all mode do not aggregate them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `verify` was called on a validator that never received an input.
    #[error("validator has no input; chain a check or bind it to a named input first")]
    MissingInput,

    /// An item or shape validator reads from a source that cannot be rebound.
    #[error("validator '{name}' requires a settable value source")]
    NotSettable { name: String },

    /// The host object behind an input has no member with the accessor's name.
    #[error("source object has no member named '{accessor}'")]
    MissingMember { accessor: String },
}

/// Error returned by `verify` and `Schema::validate`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input did not pass its checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The schema itself is misconfigured.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl Error {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(error) => Some(error),
            Error::Configuration(_) => None,
        }
    }

    /// Converts into the validation failure, if this is one.
    pub fn into_validation(self) -> Option<ValidationError> {
        match self {
            Error::Validation(error) => Some(error),
            Error::Configuration(_) => None,
        }
    }

    /// Returns true for misuse of the API rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
