use thiserror::Error;

use crate::call::Id;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum CallCenterError {
    /// No call has the given ID.
    #[error("No call with ID {0}")]
    NotFound(Id),

    /// The ID in the request could not name any call.
    #[error("Invalid call ID {0:?}")]
    InvalidId(String),

    /// A required combination of fields was not supplied.
    #[error("{0}")]
    Validation(&'static str),

    /// The caller may not perform the requested action.
    #[error("Forbidden")]
    Forbidden,

    /// The call exists but has no recording.
    #[error("No recording for call {0}")]
    NoRecording(Id),

    /// Represents a request body that is not valid JSON for the operation.
    #[error("Malformed request body: {source}")]
    MalformedBody { source: serde_json::Error },
}

/// Enumerates errors encountered while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to something that could not be parsed.
    #[error("could not parse {name} ({value:?})")]
    InvalidValue { name: &'static str, value: String },

    /// A variable that must hold a URL does not.
    #[error("could not parse {name} as a URL")]
    InvalidUrl {
        name: &'static str,
        source: url::ParseError,
    },
}
