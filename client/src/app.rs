//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{login::LoginPage, product_edit::ProductEditPage, products::ProductsPage};
use crate::state::{auth::AuthState, backend::BackendState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and backend contexts, restores the tab's session, and
/// fetches the hosted-service config once in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let backend = RwSignal::new(BackendState::default());
    provide_context(auth);
    provide_context(backend);

    #[cfg(feature = "hydrate")]
    {
        // After hydration, so the first client render matches the server's.
        Effect::new(move || auth.set(AuthState::restored(crate::util::session::load())));
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_backend_config().await {
                Ok(config) => backend.set(BackendState { config: Some(config), error: None }),
                Err(e) => {
                    leptos::logging::warn!("backend config unavailable: {e}");
                    backend.set(BackendState { config: None, error: Some(e) });
                }
            }
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront-admin.css"/>
        <Title text="Storefront Admin"/>

        <Show when=move || backend.get().failed()>
            <p class="banner banner--error">"Service configuration unavailable. Please reload."</p>
        </Show>
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=ProductsPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("products")) view=ProductsPage/>
                <Route
                    path=(StaticSegment("admin"), StaticSegment("products"), ParamSegment("id"), StaticSegment("edit"))
                    view=ProductEditPage
                />
            </Routes>
        </Router>
    }
}
