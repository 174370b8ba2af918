/*
[INPUT]:  Error sources (options, transport, response parsing, accessors)
[OUTPUT]: Structured error type shared by the whole crate
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the Issuu adapter
#[derive(Error, Debug)]
pub enum IssuuError {
    /// Option set received a name outside the recognized fields
    #[error("Invalid option '{field}': {reason}")]
    InvalidOption { field: String, reason: String },

    /// Sending the request or reading its body failed
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// Body was not the expected JSON envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Accessor name is not `get<Field>` / `has<Field>`
    #[error("Method \"{0}\" does not exist")]
    UnknownMethod(String),

    /// Helper method received an unusable argument
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Configured endpoint is not a valid URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl IssuuError {
    /// Wrap any transport-level failure
    pub fn transport(err: impl Into<BoxError>) -> Self {
        IssuuError::Transport(err.into())
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, IssuuError::Transport(_))
    }

    /// Check if the error came from the response rather than the request
    pub fn is_response_error(&self) -> bool {
        matches!(self, IssuuError::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for IssuuError {
    fn from(err: reqwest::Error) -> Self {
        IssuuError::Transport(Box::new(err))
    }
}

/// Result type alias for Issuu operations
pub type Result<T> = std::result::Result<T, IssuuError>;
