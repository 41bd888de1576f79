//! Route history with guard checks.

use evt_auth::{GuardDecision, RouteGuard, Session};
use evt_core::{RedirectTarget, Route};
use serde::Serialize;

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation {
    Entered { route: Route },
    /// The session is still verifying a stored token; show a loading
    /// indicator and call [`Navigator::resume`] once it settles.
    Pending { route: Route },
    Redirected { to: Route, from: RedirectTarget },
}

#[derive(Debug)]
pub struct Navigator {
    session: Session,
    current: Route,
    history: Vec<Route>,
    remembered: Option<RedirectTarget>,
    pending: Option<Route>,
}

impl Navigator {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self {
            session,
            current: Route::Browse,
            history: Vec::new(),
            remembered: None,
            pending: None,
        }
    }

    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Target a successful login will return to.
    #[must_use]
    pub const fn remembered(&self) -> Option<&RedirectTarget> {
        self.remembered.as_ref()
    }

    /// Navigate to a path such as `/protected` or `/login?from=%2Fprotected`.
    pub fn open(&mut self, path: &str) -> Navigation {
        if let Some(target) = RedirectTarget::from_login_path(path) {
            self.remembered = Some(target);
        }
        self.navigate(Route::parse(path))
    }

    pub fn navigate(&mut self, route: Route) -> Navigation {
        match RouteGuard::check(&self.session.snapshot(), &route) {
            GuardDecision::Allow => {
                self.pending = None;
                self.enter(route.clone());
                Navigation::Entered { route }
            }
            GuardDecision::Pending => {
                self.pending = Some(route.clone());
                Navigation::Pending { route }
            }
            GuardDecision::Redirect { to, from } => {
                self.pending = None;
                self.remembered = Some(from.clone());
                self.enter(to.clone());
                Navigation::Redirected { to, from }
            }
        }
    }

    /// Re-run the guard for a route left pending by token verification.
    pub fn resume(&mut self) -> Option<Navigation> {
        let route = self.pending.take()?;
        Some(self.navigate(route))
    }

    /// After login: go to the remembered target, or browse by default.
    pub fn complete_login(&mut self) -> Navigation {
        let target = self
            .remembered
            .take()
            .map_or(Route::Browse, |target| target.route());
        self.navigate(target)
    }

    /// Go back one entry. The guard runs again, so a protected page left
    /// before logout redirects to login.
    pub fn back(&mut self) -> Option<Navigation> {
        let previous = self.history.pop()?;
        let depth = self.history.len();
        let navigation = self.navigate(previous);
        // Going back never records the page being left.
        self.history.truncate(depth);
        Some(navigation)
    }

    fn enter(&mut self, route: Route) {
        if route != self.current {
            let previous = std::mem::replace(&mut self.current, route);
            self.history.push(previous);
        }
    }
}
