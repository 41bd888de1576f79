//! Token issue and verification.

use chrono::{DateTime, Utc};
use evt_auth::SessionToken;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{GraphqlClient, error::ClientError};

pub(crate) const TOKEN_AUTH: &str = r"
mutation signInUser($username: String!, $password: String!) {
  tokenAuth(username: $username, password: $password) {
    token
  }
}";

pub(crate) const VERIFY_TOKEN: &str = r"
mutation verifyUser($token: String!) {
  verifyToken(token: $token) {
    payload
  }
}";

/// Claims returned by a successful token verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPayload {
    pub username: String,
    pub expires_at: DateTime<Utc>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl TokenPayload {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    username: String,
    exp: i64,
    orig_iat: Option<i64>,
}

impl TryFrom<RawPayload> for TokenPayload {
    type Error = ClientError;

    fn try_from(raw: RawPayload) -> Result<Self, Self::Error> {
        let expires_at = DateTime::from_timestamp(raw.exp, 0)
            .ok_or_else(|| ClientError::Parse(format!("invalid exp timestamp {}", raw.exp)))?;
        let issued_at = raw.orig_iat.and_then(|iat| DateTime::from_timestamp(iat, 0));
        Ok(Self {
            username: raw.username,
            expires_at,
            issued_at,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAuthData {
    token_auth: Option<TokenAuthPayload>,
}

#[derive(Deserialize)]
struct TokenAuthPayload {
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyTokenData {
    verify_token: Option<VerifyTokenPayload>,
}

#[derive(Deserialize)]
struct VerifyTokenPayload {
    payload: Option<RawPayload>,
}

impl GraphqlClient {
    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Bad credentials come back as [`ClientError::GraphQl`].
    pub async fn issue_token(&self, username: &str, password: &str) -> Result<SessionToken, ClientError> {
        let data: TokenAuthData = self
            .execute(
                "signInUser",
                TOKEN_AUTH,
                json!({ "username": username, "password": password }),
            )
            .await?;
        data.token_auth
            .and_then(|payload| payload.token)
            .and_then(SessionToken::new)
            .ok_or_else(|| ClientError::Parse("tokenAuth returned no token".into()))
    }

    /// Ask the server whether `token` is still valid.
    ///
    /// # Errors
    ///
    /// Expired or forged tokens come back as [`ClientError::GraphQl`].
    pub async fn check_token(&self, token: &SessionToken) -> Result<TokenPayload, ClientError> {
        let data: VerifyTokenData = self
            .execute("verifyUser", VERIFY_TOKEN, json!({ "token": token.expose() }))
            .await?;
        data.verify_token
            .and_then(|payload| payload.payload)
            .ok_or_else(|| ClientError::Parse("verifyToken returned no payload".into()))?
            .try_into()
    }
}
