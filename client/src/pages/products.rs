//! Product list: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists every product once the session and backend config are available,
//! with a link per row to the product editor.

use catalog::Product;
use catalog::inventory::{edit_path, format_price};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::state::backend::BackendState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let backend = expect_context::<RwSignal<BackendState>>();
    let navigate = use_navigate();
    let location = use_location();
    install_unauth_redirect(auth, navigate, location.pathname.get_untracked());

    let products = RwSignal::new(Vec::<Product>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<&'static str>);
    let requested = RwSignal::new(false);

    Effect::new(move || {
        if requested.get() {
            return;
        }
        let (Some(session), Some(config)) = (auth.get().session, backend.get().config) else {
            return;
        };
        requested.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::services::list_products(&config, Some(&session)).await {
                Ok(list) => products.set(list),
                Err(message) => error.set(Some(message)),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, config);
        }
    });

    let on_logout = move |_| {
        crate::util::session::clear();
        auth.set(AuthState::restored(None));
    };

    view! {
        <Show
            when=move || auth.get().signed_in()
            fallback=move || view! { <div class="products-page"><p>"Loading..."</p></div> }
        >
            <div class="products-page">
                <header class="products-page__header toolbar">
                    <span class="toolbar__title">"Products"</span>
                    <span class="toolbar__spacer"></span>
                    <span class="toolbar__self">{move || auth.get().email().unwrap_or_default().to_owned()}</span>
                    <button class="btn toolbar__logout" on:click=on_logout>"Logout"</button>
                </header>
                <Show when=move || error.get().is_some()>
                    <p class="banner banner--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || !loading.get() fallback=move || view! { <p>"Loading products..."</p> }>
                    <table class="products-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Category"</th>
                                <th>"Price"</th>
                                <th>"Stock"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                products
                                    .get()
                                    .into_iter()
                                    .map(|p| {
                                        view! {
                                            <tr>
                                                <td>{p.name.clone()}</td>
                                                <td>{p.category.clone()}</td>
                                                <td>{format_price(p.price)}</td>
                                                <td>{p.stock.unwrap_or(0)}</td>
                                                <td><a href=edit_path(&p.id)>"Edit"</a></td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>
        </Show>
    }
}
