//! Anti-forgery cookie handling.
//!
//! The server sets a `csrftoken` cookie on its index page and expects the
//! value echoed back in a header on every request.

use std::collections::BTreeMap;

/// Read a named cookie from a `Cookie:` style header (`a=1; b=2`).
///
/// Values are percent-decoded. The first match wins. Returns an empty string
/// when the cookie is missing, which callers send as an empty header value.
#[must_use]
pub fn get_cookie(header: &str, name: &str) -> String {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode(value))
        .unwrap_or_default()
}

fn decode(value: &str) -> String {
    urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
}

/// Cookies received through `Set-Cookie`, replayed on later requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `Set-Cookie` header value. Attributes after the first `;`
    /// are ignored; an empty value deletes the cookie.
    pub fn store_set_cookie(&mut self, set_cookie: &str) {
        let Some((name, value)) = set_cookie
            .split(';')
            .next()
            .and_then(|pair| pair.trim().split_once('='))
        else {
            tracing::debug!("ignoring malformed set-cookie header");
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let value = value.trim().trim_matches('"');
        if value.is_empty() {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Decoded cookie value, empty when missing.
    #[must_use]
    pub fn get(&self, name: &str) -> String {
        get_cookie(&self.header(), name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `Cookie:` header value for the next request.
    #[must_use]
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
