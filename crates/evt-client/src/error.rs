//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the signup API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Trimmed, truncated response body.
        message: String,
    },

    /// The response carried a non-empty `errors` list.
    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A mutation completed but reported `ok: false`.
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Message suitable for showing in place on a screen.
    ///
    /// Server-side messages are passed through verbatim; everything else uses
    /// the `Display` form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::GraphQl(messages) if !messages.is_empty() => messages.join(" "),
            other => other.to_string(),
        }
    }
}
