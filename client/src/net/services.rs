//! Hosted-service calls for the pages.
//!
//! Each helper builds the REST clients it needs from the fetched
//! [`BackendConfig`] and the current session, then runs the matching
//! `catalog` flow. Client construction failures are mapped onto the same
//! user-facing messages as the flow failures they stand in for.

use catalog::editor::{self, EditorError, EditorLoad, ProductForm, SaveRequest, SaveStage};
use catalog::image::ImageUpload;
use catalog::inventory::{self, LIST_FAILED_MESSAGE};
use catalog::login::{self, LoginError, LoginForm};
use catalog::{BackendConfig, Category, Product, Session};

/// Product + category reads for the editor.
pub async fn load_editor(config: &BackendConfig, session: Option<&Session>, product_id: &str) -> EditorLoad {
    match config.document_store(session) {
        Ok(store) => editor::load(&store, product_id).await,
        Err(e) => {
            leptos::logging::warn!("document store unavailable: {e}");
            let message = e.to_string();
            EditorLoad {
                product: Err(EditorError::Load(catalog::StoreError::HttpClientBuild(message.clone()))),
                categories: Err(EditorError::Categories(catalog::StoreError::HttpClientBuild(message))),
            }
        }
    }
}

/// Run the save sequence.
///
/// # Errors
///
/// Returns the flow error; its `user_message` is what the banner shows.
pub async fn save_product(
    config: &BackendConfig,
    session: Option<&Session>,
    product_id: &str,
    form: &ProductForm,
    categories: &[Category],
    new_image: Option<ImageUpload>,
    on_stage: &dyn Fn(SaveStage),
) -> Result<Product, EditorError> {
    let store = config.document_store(session).map_err(EditorError::Update)?;
    let blobs = config.object_store(session).map_err(EditorError::Upload)?;
    let request = SaveRequest { product_id, form, categories, new_image, now: crate::util::clock::now() };
    editor::save(&store, &blobs, request, on_stage).await
}

/// Product list for the landing view.
///
/// # Errors
///
/// Returns the banner text when the list cannot be read.
pub async fn list_products(config: &BackendConfig, session: Option<&Session>) -> Result<Vec<Product>, &'static str> {
    let store = config.document_store(session).map_err(|e| {
        leptos::logging::warn!("document store unavailable: {e}");
        LIST_FAILED_MESSAGE
    })?;
    inventory::list_products(&store).await.map_err(|_| LIST_FAILED_MESSAGE)
}

/// Validate and sign in.
///
/// # Errors
///
/// See [`login::submit`].
pub async fn sign_in(config: &BackendConfig, form: &LoginForm) -> Result<Session, LoginError> {
    let auth = config.auth_provider()?;
    login::submit(&auth, form, crate::util::clock::now()).await
}
