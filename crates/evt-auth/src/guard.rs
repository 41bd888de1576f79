//! Route guard: decides whether a screen may mount for the current session.

use evt_core::{AuthState, RedirectTarget, Route};

use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// A stored token is still being verified. Render a loading indicator
    /// and ask again once the session publishes its next state.
    Pending,
    /// Send the user to `to`, remembering where they were going.
    Redirect { to: Route, from: RedirectTarget },
}

impl GuardDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Stateless guard over a session snapshot.
///
/// Access to protected routes requires [`AuthState::Authenticated`]. An
/// unverified stored token blocks until verification resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    #[must_use]
    pub fn check(session: &SessionSnapshot, requested: &Route) -> GuardDecision {
        if !requested.is_protected() {
            return GuardDecision::Allow;
        }
        match session.state {
            AuthState::Authenticated => GuardDecision::Allow,
            AuthState::Verifying => GuardDecision::Pending,
            AuthState::Unauthenticated => {
                tracing::debug!(route = requested.name(), "redirecting to login");
                GuardDecision::Redirect {
                    to: Route::Login,
                    from: RedirectTarget::new(requested),
                }
            }
        }
    }
}
