//! # evt-auth
//!
//! Authentication state for the evt client.
//!
//! Holds the tab-scoped session token (file-backed, one file per tab),
//! publishes session changes to every screen through a typed subscription,
//! reads the anti-forgery cookie, and decides whether navigation to a route
//! is allowed.

pub mod cookie;
pub mod error;
pub mod guard;
pub mod session;
pub mod token_store;

pub use cookie::{CookieJar, get_cookie};
pub use error::AuthError;
pub use guard::{GuardDecision, RouteGuard};
pub use session::{Session, SessionSnapshot, SessionStore, SessionSubscription, SessionToken};
pub use token_store::{FileTokenStorage, MemoryTokenStorage, TokenStorage};

use evt_config::SessionConfig;

/// Open the session for the configured tab and read back any stored token.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if no state directory can be resolved
/// or the token file exists but cannot be read.
pub fn restore_session(config: &SessionConfig) -> Result<Session, AuthError> {
    let storage = FileTokenStorage::from_config(config)?;
    Session::restore(SessionStore::new(storage))
}
