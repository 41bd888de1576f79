//! Staff sign-in.

use std::sync::Arc;

use evt_auth::Session;
use evt_client::{ClientError, SignupApi, TokenPayload};
use evt_core::{AuthState, RedirectTarget, Route, ValidationError};

use crate::error::FlowError;
use crate::scope::ScreenScope;
use crate::status::Status;

/// Login form. The email doubles as the username.
pub struct LoginFlow<A> {
    api: Arc<A>,
    session: Session,
    scope: ScreenScope,
    from: Option<RedirectTarget>,
    email: String,
    password: String,
    status: Status,
}

impl<A: SignupApi> LoginFlow<A> {
    /// `from` is the route a guard intercepted, if any.
    pub fn new(
        api: Arc<A>,
        session: Session,
        scope: ScreenScope,
        from: Option<RedirectTarget>,
    ) -> Self {
        Self {
            api,
            session,
            scope,
            from,
            email: String::new(),
            password: String::new(),
            status: Status::Idle,
        }
    }

    /// Verify a token restored from storage.
    ///
    /// Promotes the session to `Authenticated` when the server accepts the
    /// token and clears it when the server rejects it. Returns `None` when
    /// there was nothing to verify.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Auth`] when the server rejected the stored token.
    /// Returns [`FlowError::Query`] when the server could not be asked (network
    /// failure, non-2xx status, unreadable body) and [`FlowError::Cancelled`]
    /// if the screen closed first. The session stays `Verifying` with its token
    /// in both of those cases.
    pub async fn mount(&mut self) -> Result<Option<TokenPayload>, FlowError> {
        if self.session.state() != AuthState::Verifying {
            return Ok(None);
        }
        let Some(token) = self.session.token() else {
            return Ok(None);
        };

        self.status = Status::Loading;
        let result = self.scope.run(self.api.verify_token(&token)).await;
        match result {
            Ok(Ok(payload)) => {
                self.session.confirm()?;
                tracing::debug!(username = %payload.username, "stored token verified");
                self.status = Status::Done;
                Ok(Some(payload))
            }
            Ok(Err(error @ ClientError::GraphQl(_))) => {
                tracing::warn!(%error, "stored token rejected; signing out");
                self.session.sign_out()?;
                let error = FlowError::Auth(error.user_message());
                self.status = Status::Failed(error.user_message());
                Err(error)
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "could not verify stored token; keeping it");
                let error = FlowError::Query(error);
                self.status = Status::Failed(error.user_message());
                Err(error)
            }
            Err(cancelled) => {
                self.status = Status::Idle;
                Err(cancelled)
            }
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current password field; empty after every submit.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Where a successful login lands: the intercepted route, else browse.
    #[must_use]
    pub fn landing(&self) -> Route {
        self.from
            .as_ref()
            .map_or(Route::Browse, RedirectTarget::route)
    }

    /// Exchange the credentials for a token and sign in.
    ///
    /// The password field is cleared on every attempt, whatever the outcome.
    /// On failure the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] for empty fields, [`FlowError::Auth`]
    /// for rejected credentials, or [`FlowError::Cancelled`].
    pub async fn submit(&mut self) -> Result<Route, FlowError> {
        let password = std::mem::take(&mut self.password);
        let email = self.email.trim().to_string();

        let missing = if email.is_empty() {
            Some("email")
        } else if password.is_empty() {
            Some("password")
        } else {
            None
        };
        if let Some(field) = missing {
            let error = ValidationError::Required { field };
            self.status = Status::Failed(error.to_string());
            return Err(error.into());
        }

        self.status = Status::Loading;
        let result = self.scope.run(self.api.token_auth(&email, &password)).await;
        match result {
            Ok(Ok(token)) => {
                self.session.sign_in(token)?;
                tracing::debug!("signed in");
                self.status = Status::Done;
                Ok(self.landing())
            }
            Ok(Err(error)) => {
                let error = FlowError::Auth(error.user_message());
                self.status = Status::Failed(error.user_message());
                Err(error)
            }
            Err(cancelled) => {
                self.status = Status::Idle;
                Err(cancelled)
            }
        }
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake::{FakeApi, STAFF_EMAIL, STAFF_PASSWORD};
    use evt_auth::{MemoryTokenStorage, SessionSnapshot, SessionStore};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    fn login(api: &Arc<FakeApi>, session: &Session, from: Option<Route>) -> LoginFlow<FakeApi> {
        LoginFlow::new(
            Arc::clone(api),
            session.clone(),
            ScreenScope::new(),
            from.as_ref().map(RedirectTarget::new),
        )
    }

    #[tokio::test]
    async fn valid_credentials_sign_in_and_return_to_target() {
        let api = Arc::new(FakeApi::default());
        let session = Session::ephemeral();
        let mut flow = login(&api, &session, Some(Route::Protected));
        flow.set_email(STAFF_EMAIL);
        flow.set_password(STAFF_PASSWORD);

        assert_eq!(flow.submit().await.unwrap(), Route::Protected);
        assert!(session.snapshot().is_authenticated());
        assert_eq!(flow.password(), "");
    }

    #[tokio::test]
    async fn default_landing_is_browse() {
        let api = Arc::new(FakeApi::default());
        let mut flow = login(&api, &Session::ephemeral(), None);
        flow.set_email(STAFF_EMAIL);
        flow.set_password(STAFF_PASSWORD);
        assert_eq!(flow.submit().await.unwrap(), Route::Browse);
    }

    #[tokio::test]
    async fn bad_credentials_leave_session_untouched() {
        let api = Arc::new(FakeApi::default());
        let session = Session::ephemeral();
        let mut flow = login(&api, &session, Some(Route::Protected));
        flow.set_email(STAFF_EMAIL);
        flow.set_password("wrong");

        let err = flow.submit().await.unwrap_err();
        assert!(matches!(err, FlowError::Auth(_)));
        assert_eq!(session.snapshot(), SessionSnapshot::unauthenticated());
        assert_eq!(flow.password(), "");
        assert_eq!(flow.email(), STAFF_EMAIL);
    }

    #[tokio::test]
    async fn empty_password_is_validation_error() {
        let api = Arc::new(FakeApi::default());
        let mut flow = login(&api, &Session::ephemeral(), None);
        flow.set_email(STAFF_EMAIL);
        assert!(matches!(
            flow.submit().await,
            Err(FlowError::Validation(ValidationError::Required { field: "password" }))
        ));
    }

    #[tokio::test]
    async fn mount_confirms_known_token() {
        let api = Arc::new(FakeApi::default());
        api.issue("jwt-stored");
        let session = Session::restore(SessionStore::new(MemoryTokenStorage::with_token(
            "jwt-stored",
        )))
        .unwrap();
        let mut flow = login(&api, &session, None);

        let payload = flow.mount().await.unwrap().unwrap();
        assert_eq!(payload.username, STAFF_EMAIL);
        assert_eq!(session.state(), AuthState::Authenticated);
    }

    #[tokio::test]
    async fn mount_clears_rejected_token() {
        let api = Arc::new(FakeApi::default());
        let session = Session::restore(SessionStore::new(MemoryTokenStorage::with_token(
            "jwt-forged",
        )))
        .unwrap();
        let mut flow = login(&api, &session, None);

        assert!(matches!(flow.mount().await, Err(FlowError::Auth(_))));
        assert_eq!(session.snapshot(), SessionSnapshot::unauthenticated());
    }

    #[tokio::test]
    async fn mount_without_token_is_noop() {
        let api = Arc::new(FakeApi::default());
        let mut flow = login(&api, &Session::ephemeral(), None);
        assert!(flow.mount().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cancelled_mount_keeps_verifying() {
        let api = Arc::new(FakeApi::default());
        api.issue("jwt-stored");
        let session = Session::restore(SessionStore::new(MemoryTokenStorage::with_token(
            "jwt-stored",
        )))
        .unwrap();
        let mut flow = login(&api, &session, None);
        flow.unmount();

        assert!(matches!(flow.mount().await, Err(FlowError::Cancelled)));
        assert_eq!(session.state(), AuthState::Verifying);
    }

    #[tokio::test]
    async fn server_outage_during_mount_keeps_stored_token() {
        let api = Arc::new(FakeApi::default());
        api.issue("jwt-valid");
        api.fail_reads.store(true, Ordering::SeqCst);
        let session = Session::restore(SessionStore::new(MemoryTokenStorage::with_token(
            "jwt-valid",
        )))
        .unwrap();
        let mut flow = login(&api, &session, None);

        let err = flow.mount().await.unwrap_err();
        assert!(matches!(
            err,
            FlowError::Query(ClientError::Api { status: 503, .. })
        ));
        assert_eq!(session.state(), AuthState::Verifying);
        assert_eq!(session.token().unwrap().expose(), "jwt-valid");
        assert!(matches!(flow.status(), Status::Failed(_)));

        api.fail_reads.store(false, Ordering::SeqCst);
        assert!(flow.mount().await.unwrap().is_some());
        assert_eq!(session.state(), AuthState::Authenticated);
    }
}
