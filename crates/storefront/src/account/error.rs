//! Account Service transport errors.

use thiserror::Error;

/// Errors that can occur when talking to the Account Service.
#[derive(Debug, Error)]
pub enum AccountError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Account Service returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, if any.
        message: Option<String>,
    },

    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response parsed but did not carry the expected user document.
    #[error("Response missing `{0}` document")]
    MissingDocument(&'static str),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AccountError {
    /// HTTP status code, if the service answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service rejected the caller's credentials or session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the request timed out at the transport level.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
