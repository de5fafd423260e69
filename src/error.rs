use std::fmt;

/// Closed set of failure categories derived from an HTTP status code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCategory {
    /// Credential rejected (401). Never retried.
    Unauthorized,
    /// Quota or rate limit (429) still failing after the retry ceiling.
    RateLimited,
    /// Upstream 5xx still failing after the retry ceiling.
    ServerError,
    /// Any other non-success status. Never retried.
    ClientError,
}

impl ErrorCategory {
    /// Whether the executor retries responses of this category.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::ServerError)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate limited",
            Self::ServerError => "server error",
            Self::ClientError => "client error",
        };
        f.write_str(name)
    }
}

/// Terminal failure reported by the Search Console API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiError {
    pub category: ErrorCategory,
    /// HTTP status of the last failing attempt.
    pub status: u16,
    /// Message from `error.message`, top-level `message`, or the raw body.
    pub message: String,
    /// Machine-readable reason from `error.errors[0].reason`, if any.
    pub reason: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category == ErrorCategory::Unauthorized {
            return write!(f, "Unauthorized: {}", self.message);
        }
        write!(f, "API error {}: {}", self.status, self.message)?;
        if let Some(reason) = &self.reason {
            write!(f, " (reason={reason})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SearchConsoleError {
    /// Non-success HTTP status classified into an [`ErrorCategory`].
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Success body that is not a JSON object, or a typed decode failure.
    #[error("decode error: {0}")]
    Decode(String),
    /// Missing or invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchConsoleError {
    /// Category of an API failure, `None` for transport/decode/config errors.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Api(err) => Some(err.category),
            _ => None,
        }
    }

    /// HTTP status of an API failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// True for rate-limit and server errors that exhausted their retries.
    pub fn is_retryable(&self) -> bool {
        self.category().is_some_and(ErrorCategory::is_retryable)
    }
}
