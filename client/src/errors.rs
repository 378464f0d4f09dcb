use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures raised by the gateway and the domain services.
///
/// The UI never distinguishes these by cause: forms and pages collapse every
/// variant into a single failure notification. The variants exist so the
/// diagnostic trace says what actually went wrong.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("`{0}` cannot be used as a path segment")]
    InvalidSegment(String),
    #[error("session token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("no user is logged in")]
    NotLoggedIn,
}

impl ClientError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

/// Reasons a form refused to submit. Neither variant issues a network call.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("a submission is already in flight")]
    InFlight,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api url `{value}`: {source}")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api url `{0}` cannot be used as a base")]
    NotABase(String),
}
