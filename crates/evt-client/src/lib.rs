//! # evt-client
//!
//! GraphQL-over-HTTP client for the event-signup API.
//!
//! Every operation is a POST to one endpoint. Each request carries the
//! anti-forgery header echoed from the `csrftoken` cookie and, once the
//! session holds a token, an `Authorization: JWT <token>` header.
//!
//! Flows depend on the [`SignupApi`] trait rather than on [`GraphqlClient`]
//! so they can be driven by an in-memory fake.

mod error;
mod events;
mod graphql;
mod http;
mod participants;
mod token;

pub use error::ClientError;
pub use token::TokenPayload;

use std::future::Future;
use std::sync::Mutex;

use evt_auth::{CookieJar, Session, SessionToken};
use evt_config::ApiConfig;
use evt_core::{EventSummary, PendingRegistration};
use serde::de::DeserializeOwned;

use crate::graphql::{GraphqlRequest, parse_envelope};
use crate::http::{capture_cookies, check_response};

/// The operations the screens consume.
pub trait SignupApi: Send + Sync {
    /// Events for the public registration form.
    fn list_events(&self) -> impl Future<Output = Result<Vec<EventSummary>, ClientError>> + Send;

    /// Register a participant, returning their id.
    fn create_participant(
        &self,
        registration: &PendingRegistration,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Verify a participant's code, returning the joined event's name.
    fn verify_participant(
        &self,
        participant_id: &str,
        code: &str,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Exchange credentials for a token.
    fn token_auth(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<SessionToken, ClientError>> + Send;

    /// Check a previously issued token.
    fn verify_token(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<TokenPayload, ClientError>> + Send;

    /// Events with numeric `uid` and live participant counts.
    fn list_events_with_counts(
        &self,
    ) -> impl Future<Output = Result<Vec<EventSummary>, ClientError>> + Send;

    /// Create an event.
    fn create_event(
        &self,
        name: &str,
        max_participants: i64,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Authenticated link to the participant export of event `uid`.
    fn download_link(&self, uid: &str, token: &SessionToken) -> String;
}

/// reqwest-backed [`SignupApi`].
#[derive(Debug)]
pub struct GraphqlClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Session,
    cookies: Mutex<CookieJar>,
}

impl GraphqlClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("evt/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            config,
            session,
            cookies: Mutex::new(CookieJar::new()),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch the index page once so the server sets the anti-forgery cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the server answers
    /// with a non-success status.
    pub async fn bootstrap(&self) -> Result<(), ClientError> {
        let resp = self.http.get(&self.config.base_url).send().await?;
        self.remember_cookies(&resp);
        check_response(resp).await?;
        if self.csrf_token().is_empty() {
            tracing::warn!(
                cookie = %self.config.csrf_cookie,
                "server did not set the anti-forgery cookie"
            );
        }
        Ok(())
    }

    /// Current anti-forgery token, empty when the cookie was never set.
    #[must_use]
    pub fn csrf_token(&self) -> String {
        self.with_cookies(|jar| jar.get(&self.config.csrf_cookie))
    }

    /// Run one GraphQL operation and decode its `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ClientError> {
        let (csrf, cookie_header) = self.with_cookies(|jar| {
            (jar.get(&self.config.csrf_cookie), jar.header())
        });

        let mut request = self
            .http
            .post(self.config.graphql_url())
            .header(self.config.csrf_header.as_str(), csrf)
            .json(&GraphqlRequest { query, variables });
        if !cookie_header.is_empty() {
            request = request.header(reqwest::header::COOKIE, cookie_header);
        }
        if let Some(token) = self.session.token() {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("JWT {}", token.expose()),
            );
        }

        tracing::debug!(operation, "graphql request");
        let resp = request.send().await?;
        self.remember_cookies(&resp);
        let body = check_response(resp).await?.text().await?;
        parse_envelope(&body).inspect_err(|error| {
            tracing::debug!(operation, %error, "graphql request failed");
        })
    }

    fn remember_cookies(&self, resp: &reqwest::Response) {
        self.with_cookies(|jar| capture_cookies(resp, jar));
    }

    /// Cookie jar access. A poisoned lock still holds usable cookies.
    fn with_cookies<R>(&self, f: impl FnOnce(&mut CookieJar) -> R) -> R {
        let mut jar = self
            .cookies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut jar)
    }
}

impl SignupApi for GraphqlClient {
    async fn list_events(&self) -> Result<Vec<EventSummary>, ClientError> {
        self.fetch_events().await
    }

    async fn create_participant(
        &self,
        registration: &PendingRegistration,
    ) -> Result<String, ClientError> {
        self.register_participant(registration).await
    }

    async fn verify_participant(
        &self,
        participant_id: &str,
        code: &str,
    ) -> Result<String, ClientError> {
        self.submit_code(participant_id, code).await
    }

    async fn token_auth(&self, username: &str, password: &str) -> Result<SessionToken, ClientError> {
        self.issue_token(username, password).await
    }

    async fn verify_token(&self, token: &SessionToken) -> Result<TokenPayload, ClientError> {
        self.check_token(token).await
    }

    async fn list_events_with_counts(&self) -> Result<Vec<EventSummary>, ClientError> {
        self.fetch_events_with_counts().await
    }

    async fn create_event(&self, name: &str, max_participants: i64) -> Result<(), ClientError> {
        self.post_event(name, max_participants).await
    }

    fn download_link(&self, uid: &str, token: &SessionToken) -> String {
        download_link(&self.config, uid, token)
    }
}

/// `<base>/download/?token=<jwt>&pk=<uid>`.
#[must_use]
pub fn download_link(config: &ApiConfig, uid: &str, token: &SessionToken) -> String {
    format!(
        "{}?token={}&pk={}",
        config.download_url(),
        urlencoding::encode(token.expose()),
        urlencoding::encode(uid)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn download_link_carries_token_and_pk() {
        let token = SessionToken::new("a.b+c").unwrap();
        let link = download_link(&ApiConfig::default(), "12", &token);
        assert_eq!(link, "http://localhost:8000/download/?token=a.b%2Bc&pk=12");
    }

    #[test]
    fn client_builds_from_default_config() {
        let client = GraphqlClient::new(ApiConfig::default(), Session::ephemeral()).unwrap();
        assert_eq!(client.csrf_token(), "");
        assert_eq!(client.config().graphql_url(), "http://localhost:8000/graphql/");
    }

    #[test]
    fn queries_name_the_expected_fields() {
        assert!(events::LIST_EVENTS.contains("participantsCount"));
        assert!(events::LIST_EVENTS_WITH_COUNTS.contains("uid"));
        assert!(participants::CREATE_PARTICIPANT.contains("event: { id: $eventId }"));
        assert!(participants::VERIFY_PARTICIPANT.contains("verifyParticipant"));
        assert!(token::TOKEN_AUTH.contains("tokenAuth"));
        assert!(token::VERIFY_TOKEN.contains("payload"));
        assert!(events::CREATE_EVENT.contains("maxParticipants: $maxParticipants"));
    }
}
