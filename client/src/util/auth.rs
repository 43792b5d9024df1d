//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes apply identical unauthenticated redirect behavior: back to
//! `/login` with the current path as the return target.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// True once the session restore finished without a session.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.signed_in()
}

/// Redirect to the login page whenever auth has loaded and no session is
/// present. `return_path` is where the login page sends the user back to.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F, return_path: String)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let target = catalog::login::login_url(&return_path);
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
