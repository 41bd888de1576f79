//! Session store and the auth context built on top of it.
//!
//! [`SessionStore`] owns the persisted token. [`Session`] is the handle every
//! flow receives explicitly: it mirrors the token in memory together with the
//! [`AuthState`] and publishes each change on a `watch` channel, in the same
//! call that performed the write.

use std::fmt;
use std::sync::Arc;

use evt_core::AuthState;
use tokio::sync::watch;

use crate::error::AuthError;
use crate::token_store::{MemoryTokenStorage, TokenStorage};

/// Opaque authentication token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns `None` for empty or whitespace-only input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw token, for request headers and export links only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Persisted token of one tab: `get_token` / `set_token`.
pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// A store that forgets everything when dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStorage::new())
    }

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the storage cannot be read.
    pub fn get_token(&self) -> Result<Option<SessionToken>, AuthError> {
        Ok(self.storage.load()?.and_then(SessionToken::new))
    }

    /// Persist `Some(token)`, or remove the entry for `None`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the storage cannot be written.
    pub fn set_token(&self, token: Option<&SessionToken>) -> Result<(), AuthError> {
        match token {
            Some(token) => self.storage.store(token.expose()),
            None => self.storage.clear(),
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

/// What every subscriber sees: the in-memory token mirror and auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<SessionToken>,
    pub state: AuthState,
}

impl SessionSnapshot {
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            token: None,
            state: AuthState::Unauthenticated,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }
}

#[derive(Debug)]
struct SessionInner {
    store: SessionStore,
    tx: watch::Sender<SessionSnapshot>,
}

/// Shared session handle. Clones observe and mutate the same session.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Read back the stored token at startup.
    ///
    /// A stored token starts in [`AuthState::Verifying`]; it is not trusted
    /// until [`Session::confirm`] is called.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the store cannot be read.
    pub fn restore(store: SessionStore) -> Result<Self, AuthError> {
        let token = store.get_token()?;
        let state = if token.is_some() {
            AuthState::Verifying
        } else {
            AuthState::Unauthenticated
        };
        tracing::debug!(%state, "session restored");
        let (tx, _rx) = watch::channel(SessionSnapshot { token, state });
        Ok(Self {
            inner: Arc::new(SessionInner { store, tx }),
        })
    }

    /// An empty, memory-only session.
    #[must_use]
    pub fn ephemeral() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::unauthenticated());
        Self {
            inner: Arc::new(SessionInner {
                store: SessionStore::in_memory(),
                tx,
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.inner.tx.borrow().token.clone()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.tx.borrow().state
    }

    /// The token, or `NotAuthenticated` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when no token is held.
    pub fn require_token(&self) -> Result<SessionToken, AuthError> {
        self.token().ok_or(AuthError::NotAuthenticated)
    }

    /// Persist a freshly issued token, then publish `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the token cannot be persisted;
    /// the published state is unchanged in that case.
    pub fn sign_in(&self, token: SessionToken) -> Result<(), AuthError> {
        self.inner.store.set_token(Some(&token))?;
        self.transition(AuthState::Authenticated, |snapshot| {
            snapshot.token = Some(token);
        })
    }

    /// Accept the stored token after the remote side verified it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when the session has no token.
    pub fn confirm(&self) -> Result<(), AuthError> {
        if self.token().is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        self.transition(AuthState::Authenticated, |_| {})
    }

    /// Clear the stored token and publish `Unauthenticated`.
    ///
    /// Signing out of an already empty session only clears storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the stored token cannot be removed.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.store.set_token(None)?;
        if self.state() == AuthState::Unauthenticated {
            return Ok(());
        }
        self.transition(AuthState::Unauthenticated, |snapshot| {
            snapshot.token = None;
        })
    }

    /// `setToken(token | absent)`: sign in with a token, sign out without one.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Session::sign_in`] and [`Session::sign_out`].
    pub fn set_token(&self, token: Option<SessionToken>) -> Result<(), AuthError> {
        match token {
            Some(token) => self.sign_in(token),
            None => self.sign_out(),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.inner.tx.subscribe(),
        }
    }

    fn transition(
        &self,
        next: AuthState,
        update: impl FnOnce(&mut SessionSnapshot),
    ) -> Result<(), AuthError> {
        let mut result = Ok(());
        self.inner.tx.send_if_modified(|snapshot| {
            if !snapshot.state.can_transition_to(next) {
                result = Err(AuthError::InvalidTransition {
                    from: snapshot.state,
                    to: next,
                });
                return false;
            }
            snapshot.state = next;
            update(snapshot);
            true
        });
        if result.is_ok() {
            tracing::debug!(state = %next, "session state published");
        }
        result
    }
}

/// Typed receiving end of the session channel.
#[derive(Debug, Clone)]
pub struct SessionSubscription {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionSubscription {
    /// The latest published snapshot, marking it seen.
    pub fn current(&mut self) -> SessionSnapshot {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next publication. `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
