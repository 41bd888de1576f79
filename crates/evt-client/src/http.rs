//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (non-success → [`ClientError::Api`] with a
//! sanitized body) and cookie capture so the operation modules stay focused
//! on request construction and response mapping.

use evt_auth::CookieJar;

use crate::error::ClientError;

/// Longest error body surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status,
            message: sanitize_body(&body),
        });
    }
    Ok(resp)
}

/// Copy every `Set-Cookie` header of `resp` into `jar`.
pub fn capture_cookies(resp: &reqwest::Response, jar: &mut CookieJar) {
    for value in resp.headers().get_all(reqwest::header::SET_COOKIE) {
        match value.to_str() {
            Ok(value) => jar.store_set_cookie(value),
            Err(_) => tracing::warn!("ignoring non-ascii set-cookie header"),
        }
    }
}

/// Trim and truncate an error body for display.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
