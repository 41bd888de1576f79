//! State-machine enums.
//!
//! Serialized as `snake_case`. Enums with a lifecycle expose
//! `allowed_next_states()` so transitions are checked where they happen.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AuthState
// ---------------------------------------------------------------------------

/// Authentication state of the current tab session, read by the route guard.
///
/// ```text
/// unauthenticated → verifying → authenticated
///                 ↘ authenticated (fresh login)
/// verifying → unauthenticated (stored token rejected)
/// authenticated → unauthenticated (logout)
/// ```
///
/// `Verifying` means a token was found in storage but has not been confirmed
/// by the remote side during this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Unauthenticated,
    Verifying,
    Authenticated,
}

impl AuthState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unauthenticated => &[Self::Verifying, Self::Authenticated],
            Self::Verifying => &[Self::Authenticated, Self::Unauthenticated],
            Self::Authenticated => &[Self::Unauthenticated, Self::Authenticated],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Verifying => "verifying",
            Self::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
