//! Session contracts consumed by the transport layer.
//!
//! Token storage and navigation are owned elsewhere; this module only
//! defines the traits the transport needs so tests can substitute no-ops.

use serde::Deserialize;

/// Authenticated portal user as exposed by the auth store.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Role string used by the admin UI for gating, e.g. `"admin"`.
    pub role: String,
}

/// Read-only view of the externally owned auth state.
pub trait AuthStore: Send + Sync {
    /// Current bearer token, if a session exists. Absence is not an error;
    /// public endpoints work unauthenticated.
    fn token(&self) -> Option<String>;

    /// The logged-in user, when known.
    fn current_user(&self) -> Option<CurrentUser>;

    /// Drop any stored session state.
    fn clear(&self);
}

/// Navigation side effect fired when the backend rejects the session.
///
/// Implementations decide what "go to login" means and must not redirect
/// when the login page is already showing. The transport additionally
/// guards against firing this more than once per expiry episode, so
/// concurrent 401s cannot cause a redirect storm.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

/// Store with no session, for anonymous public pages and tests.
#[derive(Debug, Default)]
pub struct AnonymousAuth;

impl AuthStore for AnonymousAuth {
    fn token(&self) -> Option<String> {
        None
    }

    fn current_user(&self) -> Option<CurrentUser> {
        None
    }

    fn clear(&self) {}
}

/// Fixed-token store for scripted admin jobs and tests.
#[derive(Debug)]
pub struct StaticToken(pub String);

impl AuthStore for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn current_user(&self) -> Option<CurrentUser> {
        None
    }

    fn clear(&self) {}
}

/// Redirect that does nothing, for tests and non-browser callers.
#[derive(Debug, Default)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self) {}
}
