//! Route guard for session-protected views

use crate::session::SessionStore;

/// What a guarded route should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome<T> {
    /// A session is present; render the wrapped view
    Render(T),

    /// No session; send the user to the login route
    RedirectToLogin,
}

impl<T> RouteOutcome<T> {
    /// Whether this outcome is a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self, RouteOutcome::RedirectToLogin)
    }
}

/// Wraps any view behind a session-presence check.
///
/// Only presence is checked; the token's expiry claim is not inspected.
/// An expired token is caught by the first authenticated request, which
/// answers 401 and clears the session.
#[derive(Debug)]
pub struct Protected<V> {
    view: V,
}

impl<V> Protected<V> {
    /// Wrap a view
    pub fn new(view: V) -> Self {
        Self { view }
    }

    /// Resolve against the session store
    pub fn resolve(&self, session: &SessionStore) -> RouteOutcome<&V> {
        if session.is_signed_in() {
            RouteOutcome::Render(&self.view)
        } else {
            RouteOutcome::RedirectToLogin
        }
    }

    /// Unwrap the view
    pub fn into_inner(self) -> V {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[derive(Debug, PartialEq)]
    struct DashboardView;

    #[test]
    fn test_redirects_without_a_session() {
        let store = SessionStore::in_memory();
        let route = Protected::new(DashboardView);

        assert!(route.resolve(&store).is_redirect());
    }

    #[test]
    fn test_renders_with_a_session() {
        let store = SessionStore::in_memory();
        store.set(Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            username: "maria".to_string(),
        });

        let route = Protected::new(DashboardView);
        match route.resolve(&store) {
            RouteOutcome::Render(view) => assert_eq!(view, &DashboardView),
            RouteOutcome::RedirectToLogin => panic!("expected render"),
        }
    }

    #[test]
    fn test_clearing_the_session_flips_the_outcome() {
        let store = SessionStore::in_memory();
        store.set(Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            username: "maria".to_string(),
        });

        let route = Protected::new(DashboardView);
        assert!(!route.resolve(&store).is_redirect());

        store.clear();
        assert!(route.resolve(&store).is_redirect());
    }
}
