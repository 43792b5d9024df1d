//! Product editor page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/admin/products/:id/edit`, behind the auth guard. On activation the
//! product and the category list are read concurrently; on submit the form is
//! validated locally, then `catalog::editor::save` runs the upload -> delete
//! old image -> update sequence while the page shows the current save stage.
//!
//! The picked image is checked (type, size) as soon as it is selected and read
//! into memory; a rejected file is cleared from the input and never kept.

#[cfg(test)]
#[path = "product_edit_test.rs"]
mod product_edit_test;

use catalog::Category;
use catalog::editor::{EditorError, ProductForm, SAVE_FAILED_MESSAGE, SaveStage};
use catalog::image::ImageUpload;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_params_map};

use crate::state::auth::AuthState;
use crate::state::backend::BackendState;
use crate::util::auth::install_unauth_redirect;

/// Where the editor returns to on success, cancel, or a missing product.
pub const PRODUCTS_PATH: &str = "/admin/products";

fn submit_label(saving: bool, stage: Option<SaveStage>) -> &'static str {
    if !saving {
        return "Save Changes";
    }
    stage.map_or("Saving...", SaveStage::label)
}

fn image_button_label(has_preview: bool) -> &'static str {
    if has_preview { "Change image" } else { "Upload image" }
}

/// A load failure that sends the user back to the list.
fn leaves_editor(err: &EditorError) -> bool {
    matches!(err, EditorError::NotFound(_))
}

/// Drop everything tied to the previously shown product.
fn reset_for_product(
    form: RwSignal<ProductForm>,
    new_image: RwSignal<Option<ImageUpload>>,
    preview: RwSignal<String>,
    error: RwSignal<Option<&'static str>>,
) {
    #[cfg(feature = "hydrate")]
    crate::util::files::revoke_preview_url(&preview.get_untracked());
    form.set(ProductForm::default());
    new_image.set(None);
    preview.set(String::new());
    error.set(None);
}

#[component]
pub fn ProductEditPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let backend = expect_context::<RwSignal<BackendState>>();
    let navigate = use_navigate();
    let location = use_location();
    let params = use_params_map();
    install_unauth_redirect(auth, navigate.clone(), location.pathname.get_untracked());

    let product_id = move || params.read().get("id").unwrap_or_default();

    let form = RwSignal::new(ProductForm::default());
    let categories = RwSignal::new(Vec::<Category>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<&'static str>);
    let new_image = RwSignal::new(None::<ImageUpload>);
    let preview = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let stage = RwSignal::new(None::<SaveStage>);
    let loaded_id = RwSignal::new(None::<String>);

    // Load once per product id, after the session and config are known.
    let navigate_missing = navigate.clone();
    Effect::new(move || {
        let id = product_id();
        if id.is_empty() || loaded_id.get_untracked().as_deref() == Some(id.as_str()) {
            return;
        }
        let (Some(session), Some(config)) = (auth.get().session, backend.get().config) else {
            return;
        };
        loaded_id.set(Some(id.clone()));
        reset_for_product(form, new_image, preview, error);
        loading.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate_missing.clone();
            leptos::task::spawn_local(async move {
                let loaded = crate::net::services::load_editor(&config, Some(&session), &id).await;
                match loaded.product {
                    Ok(product) => {
                        preview.set(product.image_url().to_owned());
                        form.set(ProductForm::from_product(&product));
                    }
                    Err(e) => {
                        error.set(Some(e.user_message()));
                        if leaves_editor(&e) {
                            navigate(PRODUCTS_PATH, NavigateOptions::default());
                        }
                    }
                }
                match loaded.categories {
                    Ok(list) => categories.set(list),
                    Err(e) => error.set(Some(e.user_message())),
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, config, &navigate_missing);
        }
    });

    let on_image_change = move |ev: leptos::ev::Event| {
        error.set(None);
        #[cfg(feature = "hydrate")]
        {
            use crate::util::files;

            let input: web_sys::HtmlInputElement = event_target(&ev);
            let Some(file) = files::selected_file(&input) else {
                return;
            };
            if let Err(e) = files::check_file(&file) {
                error.set(Some(e.user_message()));
                input.set_value("");
                return;
            }
            let url = files::preview_url(&file);
            leptos::task::spawn_local(async move {
                match files::read_file(&file).await {
                    Ok(upload) => {
                        files::revoke_preview_url(&preview.get_untracked());
                        new_image.set(Some(upload));
                        preview.set(url.unwrap_or_default());
                    }
                    Err(e) => {
                        leptos::logging::warn!("reading picked image failed: {e}");
                        error.set(Some(catalog::image::ImageError::UnsupportedType(file.type_()).user_message()));
                        input.set_value("");
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_remove_image = move |_| {
        #[cfg(feature = "hydrate")]
        crate::util::files::revoke_preview_url(&preview.get_untracked());
        new_image.set(None);
        preview.set(String::new());
        form.update(ProductForm::clear_image);
    };

    let navigate_submit = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        error.set(None);
        let current = form.get_untracked();
        let cats = categories.get_untracked();
        if let Err(e) = current.validate(&cats) {
            error.set(Some(e.user_message()));
            return;
        }
        let Some(config) = backend.get_untracked().config else {
            error.set(Some(SAVE_FAILED_MESSAGE));
            return;
        };
        let session = auth.get_untracked().session;
        let upload = new_image.get_untracked();
        let id = product_id();
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate_submit.clone();
            leptos::task::spawn_local(async move {
                let on_stage = move |s: SaveStage| stage.set(Some(s));
                let result = crate::net::services::save_product(
                    &config,
                    session.as_ref(),
                    &id,
                    &current,
                    &cats,
                    upload,
                    &on_stage,
                )
                .await;
                saving.set(false);
                stage.set(None);
                match result {
                    Ok(_) => {
                        new_image.set(None);
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(catalog::editor::SAVE_SUCCESS_MESSAGE);
                        }
                        navigate(PRODUCTS_PATH, NavigateOptions::default());
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, session, upload, id, current, &navigate_submit);
        }
    };

    let on_cancel = move |_| navigate(PRODUCTS_PATH, NavigateOptions::default());

    view! {
        <div class="editor-page">
            <h1>"Edit Product"</h1>
            <Show when=move || !loading.get() fallback=move || view! { <div class="spinner" aria-label="Loading"></div> }>
                <div class="editor-card">
                    <Show when=move || error.get().is_some()>
                        <div class="banner banner--error">{move || error.get().unwrap_or_default()}</div>
                    </Show>
                    <form class="editor-form" on:submit=on_submit.clone()>
                        <label for="name">"Product Name *"</label>
                        <input
                            id="name"
                            type="text"
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                        <label for="description">"Description"</label>
                        <textarea
                            id="description"
                            rows="3"
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        ></textarea>
                        <label for="price">"Price ($) *"</label>
                        <input
                            id="price"
                            type="number"
                            min="0"
                            step="0.01"
                            prop:value=move || form.with(|f| f.price.clone())
                            on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                        />
                        <label for="stock">"Stock"</label>
                        <input
                            id="stock"
                            type="number"
                            min="0"
                            step="1"
                            prop:value=move || form.with(|f| f.stock.clone())
                            on:input=move |ev| form.update(|f| f.stock = event_target_value(&ev))
                        />
                        <label for="category">"Category *"</label>
                        <select
                            id="category"
                            prop:value=move || form.with(|f| f.category_id.clone())
                            on:change=move |ev| form.update(|f| f.category_id = event_target_value(&ev))
                        >
                            <option value="">"Select a category"</option>
                            {move || {
                                categories
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        let selected = form.with_untracked(|f| f.category_id == c.id);
                                        view! { <option value=c.id selected=selected>{c.name}</option> }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </select>

                        <span class="editor-form__label">"Product Image"</span>
                        <div class="editor-image">
                            <Show
                                when=move || !preview.get().is_empty()
                                fallback=move || view! { <div class="editor-image__placeholder"></div> }
                            >
                                <div class="editor-image__preview">
                                    <img src=move || preview.get() alt="Preview"/>
                                    <button type="button" class="editor-image__remove" on:click=on_remove_image>
                                        "×"
                                    </button>
                                </div>
                            </Show>
                            <label class="editor-image__picker">
                                <input
                                    type="file"
                                    accept="image/jpeg,image/png,image/gif,image/webp"
                                    on:change=on_image_change
                                />
                                <span>{move || image_button_label(!preview.get().is_empty())}</span>
                            </label>
                            <p class="editor-image__hint">"PNG, JPG, GIF or WEBP up to 5MB"</p>
                        </div>

                        <div class="editor-form__actions">
                            <button type="button" class="btn" on:click=on_cancel.clone()>"Cancel"</button>
                            <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                                {move || submit_label(saving.get(), stage.get())}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </div>
    }
}
