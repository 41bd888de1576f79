//! The navigation surface: four routes plus the remembered redirect target.
//!
//! Paths follow the browser client they replace: `/login`, `/protected`,
//! `/verification?id=<participant>`, and `/` as a catch-all for anything else.

use serde::{Deserialize, Serialize};
use std::fmt;

const LOGIN_PATH: &str = "/login";
const PROTECTED_PATH: &str = "/protected";
const VERIFICATION_PATH: &str = "/verification";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// Event list and registration form.
    #[default]
    Browse,
    Login,
    /// Event management, requires an authenticated session.
    Protected,
    /// Code entry for the participant created by a registration.
    Verification { participant_id: String },
}

impl Route {
    /// Resolve a path (optionally with a query string) to a route.
    ///
    /// Matching is by leading path segment, so `/login/` and `/login/x` both
    /// resolve to [`Route::Login`]. Unknown paths resolve to [`Route::Browse`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (path, query) = input.split_once('?').unwrap_or((input, ""));

        if matches_segment(path, LOGIN_PATH) {
            Self::Login
        } else if matches_segment(path, PROTECTED_PATH) {
            Self::Protected
        } else if matches_segment(path, VERIFICATION_PATH) {
            Self::Verification {
                participant_id: query_param(query, "id").unwrap_or_default(),
            }
        } else {
            Self::Browse
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Browse => "/".to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Protected => PROTECTED_PATH.to_string(),
            Self::Verification { participant_id } => format!(
                "{VERIFICATION_PATH}?id={}",
                urlencoding::encode(participant_id)
            ),
        }
    }

    /// Whether the route guard must check the session before entering.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(self, Self::Protected)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::Login => "login",
            Self::Protected => "protected",
            Self::Verification { .. } => "verification",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The location a guard intercepted, carried through the login round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub path: String,
}

impl RedirectTarget {
    #[must_use]
    pub fn new(route: &Route) -> Self {
        Self { path: route.path() }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        Route::parse(&self.path)
    }

    /// The login path carrying this target, `/login?from=<path>`.
    #[must_use]
    pub fn login_path(&self) -> String {
        format!("{LOGIN_PATH}?from={}", urlencoding::encode(&self.path))
    }

    /// Recover the target from a login path built by [`RedirectTarget::login_path`].
    #[must_use]
    pub fn from_login_path(input: &str) -> Option<Self> {
        let (path, query) = input.trim().split_once('?')?;
        if !matches_segment(path, LOGIN_PATH) {
            return None;
        }
        query_param(query, "from")
            .filter(|from| !from.is_empty())
            .map(|path| Self { path })
    }
}

fn matches_segment(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).map_or(value.clone(), |decoded| decoded.into_owned())
        })
}
