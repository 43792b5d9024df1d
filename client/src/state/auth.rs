//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and pages to coordinate login redirects and to
//! authorize document/object requests with the session's ID token.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use catalog::Session;

/// Authentication state, provided as `RwSignal<AuthState>` context.
///
/// `loading` stays true until the stored session (if any) has been restored
/// in the browser, so guards never redirect during SSR or hydration.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading: true }
    }
}

impl AuthState {
    /// State after restoring (or failing to restore) a stored session.
    #[must_use]
    pub fn restored(session: Option<Session>) -> Self {
        Self { session, loading: false }
    }

    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.email.as_str())
    }
}
