use thiserror::Error;

/// Field or form level validation failure.
///
/// Variants are declared in display priority order: when a field carries
/// several errors, the smallest one is the one shown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationError {
    #[error("Required")]
    Required,

    #[error("Invalid email")]
    EmailFormat,

    #[error("Password too weak")]
    WeakPassword,

    #[error("Passwords do not match")]
    MatchPassword,
}

/// Failure reported by the authentication endpoint after a locally valid
/// form was submitted.
///
/// A `status` of 0 means no HTTP response was received at all.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Error {status}")]
pub struct SubmissionError {
    pub status: u16,
}

/// Error returned by an [`AuthApi`](crate::AuthApi) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("Request rejected with status {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Numeric status exposed to the error channel; transport failures map to 0
    pub fn status(&self) -> u16 {
        match self {
            Self::Status(status) => *status,
            Self::Transport(_) => 0,
        }
    }
}

impl From<ApiError> for SubmissionError {
    fn from(err: ApiError) -> Self {
        Self {
            status: err.status(),
        }
    }
}

/// Configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL for {field}: {source}")]
    Url {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
}
