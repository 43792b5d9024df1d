//! Login page: email + password sign-in with per-field validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or through an auth-guard redirect carrying
//! `?redirect=<path>`. On success the session is stored for the tab and the
//! user is sent back to that path (or `/`).

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use catalog::login::{FieldErrors, LoginForm, SIGN_IN_FAILED_MESSAGE, redirect_target};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::auth::AuthState;
use crate::state::backend::BackendState;

/// Pause between sign-in and navigation so the session context settles.
#[cfg(feature = "hydrate")]
const POST_LOGIN_DELAY_MS: u64 = 500;

fn input_class(error: Option<&str>) -> &'static str {
    if error.is_some() { "login-input login-input--error" } else { "login-input" }
}

fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "SIGN IN" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let backend = expect_context::<RwSignal<BackendState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = LoginForm { email: email.get_untracked(), password: password.get_untracked() };
        let errors = form.validate();
        field_errors.set(errors);
        if !errors.is_empty() {
            return;
        }
        error.set(None);

        let Some(config) = backend.get_untracked().config else {
            error.set(Some(SIGN_IN_FAILED_MESSAGE));
            return;
        };
        let redirect = redirect_target(query.get_untracked().get("redirect").as_deref());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::services::sign_in(&config, &form).await {
                    Ok(session) => {
                        crate::util::session::save(&session);
                        auth.set(AuthState::restored(Some(session)));
                        gloo_timers::future::sleep(std::time::Duration::from_millis(POST_LOGIN_DELAY_MS)).await;
                        busy.set(false);
                        navigate(&redirect, NavigateOptions::default());
                    }
                    Err(e) => {
                        error.set(Some(e.user_message().unwrap_or(SIGN_IN_FAILED_MESSAGE)));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, redirect, form, &navigate, auth);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"SIGN IN"</h1>
                <p class="login-card__subtitle">"Storefront admin"</p>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit novalidate=true>
                    <label for="email">"Email Address"</label>
                    <input
                        id="email"
                        class=move || input_class(field_errors.get().email)
                        type="email"
                        placeholder="Enter your email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <Show when=move || field_errors.get().email.is_some()>
                        <p class="login-field-error">{move || field_errors.get().email.unwrap_or_default()}</p>
                    </Show>
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class=move || input_class(field_errors.get().password)
                        type="password"
                        placeholder="Enter your password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || field_errors.get().password.is_some()>
                        <p class="login-field-error">{move || field_errors.get().password.unwrap_or_default()}</p>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
            </div>
        </div>
    }
}
