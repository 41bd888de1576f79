use evt_core::AuthState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `evt auth login`")]
    NotAuthenticated,

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("invalid session transition from {from} to {to}")]
    InvalidTransition { from: AuthState, to: AuthState },
}
