use evt_auth::AuthError;
use evt_client::ClientError;
use evt_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    /// A read failed (transport or remote side).
    #[error("could not load data: {0}")]
    Query(#[source] ClientError),

    /// A write failed or was rejected by the remote side.
    #[error("request failed: {0}")]
    Mutation(#[source] ClientError),

    /// Code or identity mismatch. The message is the server's, verbatim.
    #[error("{0}")]
    Verification(String),

    /// Bad credentials, a rejected token, or session storage trouble.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The owning screen was unmounted before the call finished.
    #[error("cancelled: the screen was closed")]
    Cancelled,
}

impl From<AuthError> for FlowError {
    fn from(error: AuthError) -> Self {
        Self::Auth(error.to_string())
    }
}

impl FlowError {
    /// Message shown in place on the screen.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Query(error) | Self::Mutation(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}
