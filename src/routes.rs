//! Navigation targets and the sign-in guard.
//!
//! The crate never navigates; operations that end in a navigation return the
//! [`Route`] to go to, and [`guard`] decides where a requested route really
//! leads. The decision is based only on whether the session store holds
//! credentials. No server call is made.

use std::fmt;

use crate::auth::SessionStore;

/// A page of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// The public landing page.
    Landing,
    /// The sign-in page.
    SignIn,
    /// The authenticated dashboard.
    Dashboard,
}

impl Route {
    /// Returns the path of this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::SignIn => "/sign-in",
            Self::Dashboard => "/userdashboard",
        }
    }

    /// Looks up the route for `path`, ignoring a trailing slash.
    ///
    /// `/login` is accepted as an alias of the sign-in page.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Landing),
            "/sign-in" | "/login" => Some(Self::SignIn),
            "/userdashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }

    /// Returns `true` if the route requires stored credentials.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Returns the route to show when `requested` is asked for.
///
/// - signed in and asking for the sign-in page: the dashboard
/// - signed out and asking for a protected page: the sign-in page
/// - otherwise: `requested`
///
/// # Example
///
/// ```rust
/// use vineo_client::{guard, MemorySessionStore, Route};
///
/// let store = MemorySessionStore::new();
/// assert_eq!(guard(Route::Dashboard, &store), Route::SignIn);
/// assert_eq!(guard(Route::Landing, &store), Route::Landing);
/// ```
#[must_use]
pub fn guard(requested: Route, store: &dyn SessionStore) -> Route {
    let signed_in = store.is_authenticated();
    match requested {
        Route::SignIn if signed_in => Route::Dashboard,
        route if route.requires_auth() && !signed_in => Route::SignIn,
        route => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialPair, MemorySessionStore};

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::Landing, Route::SignIn, Route::Dashboard] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_aliases_and_unknown() {
        assert_eq!(Route::from_path("/login"), Some(Route::SignIn));
        assert_eq!(Route::from_path("/userdashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn test_guard_when_signed_out() {
        let store = MemorySessionStore::new();

        assert_eq!(guard(Route::Dashboard, &store), Route::SignIn);
        assert_eq!(guard(Route::SignIn, &store), Route::SignIn);
        assert_eq!(guard(Route::Landing, &store), Route::Landing);
    }

    #[test]
    fn test_guard_when_signed_in() {
        let store = MemorySessionStore::with_credentials(CredentialPair::new("T1", "R1"));

        assert_eq!(guard(Route::SignIn, &store), Route::Dashboard);
        assert_eq!(guard(Route::Dashboard, &store), Route::Dashboard);
        assert_eq!(guard(Route::Landing, &store), Route::Landing);
    }

    #[test]
    fn test_display_is_path() {
        assert_eq!(Route::Dashboard.to_string(), "/userdashboard");
    }
}
