//! Product editor flow: load a product with the category list, validate the
//! edit form, replace the image, update the record.
//!
//! DESIGN
//! ======
//! The page owns a [`ProductForm`] bound to its inputs and calls [`load`] on
//! activation and [`save`] on submit. Validation runs before any service call,
//! so a rejected form costs no network round trip.
//!
//! The save sequence is upload -> delete old blob -> update record, with no
//! rollback. Deleting the old blob is best-effort: a failure is logged and the
//! record update still happens. If the update itself fails after an upload,
//! the new blob stays orphaned and its path is logged.
//!
//! The replaced blob is located by the stored `imagePath`. Records written
//! elsewhere carry only `imageUrl`; their path is recovered from the URL by
//! the object store, and an unrecognized URL leaves the old blob in place.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::image::{ImageError, ImageUpload, product_image_path};
use crate::model::{self, CATEGORIES, Category, PRODUCTS, Product, Record, StoredImage, find_category};
use crate::storage::{ObjectStore, StorageError};
use crate::store::{DocumentStore, StoreError};

/// Banner text for any failed save step.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to update product. Please try again.";
/// Notice shown after a successful save.
pub const SAVE_SUCCESS_MESSAGE: &str = "Product updated successfully";

// =============================================================================
// ERRORS
// =============================================================================

/// Reasons the edit form is rejected before any service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("name, price and category are required")]
    MissingRequired,
    #[error("price is not a positive number")]
    InvalidPrice,
    #[error("stock is not a non-negative integer")]
    InvalidStock,
    #[error("category is not in the loaded category list")]
    UnknownCategory,
}

impl FormError {
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingRequired => "Please fill all required fields",
            Self::InvalidPrice => "Please enter a valid price",
            Self::InvalidStock => "Please enter a valid stock quantity",
            Self::UnknownCategory => "Please select a valid category",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("product {0} not found")]
    NotFound(String),

    #[error("loading product failed: {0}")]
    Load(#[source] StoreError),

    #[error("loading categories failed: {0}")]
    Categories(#[source] StoreError),

    #[error("invalid form: {0}")]
    Invalid(#[from] FormError),

    #[error("invalid image: {0}")]
    Image(#[from] ImageError),

    #[error("image upload failed: {0}")]
    Upload(#[source] StorageError),

    #[error("product update failed: {0}")]
    Update(#[source] StoreError),

    #[error("timestamp formatting failed: {0}")]
    Timestamp(String),
}

impl EditorError {
    /// Static text shown in the editor banner. Backend causes are never
    /// surfaced; validation failures keep their specific message.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Product not found",
            Self::Load(_) => "Error loading product",
            Self::Categories(_) => "Failed to load categories",
            Self::Invalid(e) => e.user_message(),
            Self::Image(e) => e.user_message(),
            Self::Upload(_) | Self::Update(_) | Self::Timestamp(_) => SAVE_FAILED_MESSAGE,
        }
    }

    /// True for rejections that happen before any service call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Invalid(_) | Self::Image(_))
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Raw edit-form state, one string per input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category_id: String,
    /// Image currently linked to the product.
    pub image: Option<StoredImage>,
}

impl ProductForm {
    /// Populate the form from a loaded product. Missing stock shows as `0`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            stock: product.stock.map_or_else(|| "0".to_owned(), |s| s.to_string()),
            category_id: product.category_id.clone(),
            image: product.image.clone(),
        }
    }

    /// Unlink the current image. The next save stores an empty image.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Check required fields and parse numbers.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found, required fields first.
    pub fn validate(&self, categories: &[Category]) -> Result<ValidatedProduct, FormError> {
        let name = self.name.trim();
        let price = self.price.trim();
        let category_id = self.category_id.trim();
        if name.is_empty() || price.is_empty() || category_id.is_empty() {
            return Err(FormError::MissingRequired);
        }

        let price = parse_price(price).ok_or(FormError::InvalidPrice)?;
        let stock = parse_stock(&self.stock).ok_or(FormError::InvalidStock)?;
        let category = find_category(categories, category_id).ok_or(FormError::UnknownCategory)?;

        Ok(ValidatedProduct {
            name: name.to_owned(),
            description: self.description.clone(),
            price,
            stock,
            category_id: category.id.clone(),
            category_name: category.name.clone(),
        })
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|p| p.is_finite() && *p > 0.0)
}

/// Blank stock means zero.
fn parse_stock(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse::<i64>().ok().filter(|s| *s >= 0)
}

/// Form values after validation, with the category display name resolved
/// from the selected category.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: String,
    pub category_name: String,
}

impl ValidatedProduct {
    /// Every field written by a save. No image, or an image without a known
    /// path, is written as empty strings.
    #[must_use]
    pub fn to_fields(&self, image: Option<&StoredImage>, updated_at: &str) -> Record {
        let image_url = image.map_or("", |i| i.url.as_str());
        let image_path = image.and_then(|i| i.path.as_deref()).unwrap_or("");
        let mut fields = Record::new();
        fields.insert(model::FIELD_NAME.to_owned(), Value::from(self.name.as_str()));
        fields.insert(model::FIELD_DESCRIPTION.to_owned(), Value::from(self.description.as_str()));
        fields.insert(model::FIELD_PRICE.to_owned(), Value::from(self.price));
        fields.insert(model::FIELD_STOCK.to_owned(), Value::from(self.stock));
        fields.insert(model::FIELD_CATEGORY_ID.to_owned(), Value::from(self.category_id.as_str()));
        fields.insert(model::FIELD_CATEGORY.to_owned(), Value::from(self.category_name.as_str()));
        fields.insert(model::FIELD_IMAGE_URL.to_owned(), Value::from(image_url));
        fields.insert(model::FIELD_IMAGE_PATH.to_owned(), Value::from(image_path));
        fields.insert(model::FIELD_UPDATED_AT.to_owned(), Value::from(updated_at));
        fields
    }
}

// =============================================================================
// LOAD
// =============================================================================

/// Outcome of activating the editor. The two reads are independent, so each
/// keeps its own result.
#[derive(Debug)]
pub struct EditorLoad {
    pub product: Result<Product, EditorError>,
    pub categories: Result<Vec<Category>, EditorError>,
}

/// Fetch the product and the category list concurrently.
pub async fn load(store: &dyn DocumentStore, product_id: &str) -> EditorLoad {
    let (product, categories) = futures::join!(load_product(store, product_id), load_categories(store));
    EditorLoad { product, categories }
}

/// # Errors
///
/// [`EditorError::NotFound`] when no such product exists,
/// [`EditorError::Load`] when the read fails.
pub async fn load_product(store: &dyn DocumentStore, product_id: &str) -> Result<Product, EditorError> {
    match store.get(PRODUCTS, product_id).await {
        Ok(Some(doc)) => Ok(Product::from_record(&doc.id, &doc.fields)),
        Ok(None) => {
            tracing::warn!(%product_id, "product not found");
            Err(EditorError::NotFound(product_id.to_owned()))
        }
        Err(e) => {
            tracing::error!(%product_id, error = %e, "error fetching product");
            Err(EditorError::Load(e))
        }
    }
}

/// # Errors
///
/// [`EditorError::Categories`] when the list read fails.
pub async fn load_categories(store: &dyn DocumentStore) -> Result<Vec<Category>, EditorError> {
    match store.list(CATEGORIES).await {
        Ok(docs) => Ok(docs
            .iter()
            .map(|doc| Category::from_record(&doc.id, &doc.fields))
            .collect()),
        Err(e) => {
            tracing::error!(error = %e, "error fetching categories");
            Err(EditorError::Categories(e))
        }
    }
}

// =============================================================================
// SAVE
// =============================================================================

/// Visible step of an in-flight save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStage {
    UploadingImage,
    Saving,
}

impl SaveStage {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UploadingImage => "Uploading image...",
            Self::Saving => "Saving...",
        }
    }
}

/// Everything a submit needs.
pub struct SaveRequest<'a> {
    pub product_id: &'a str,
    pub form: &'a ProductForm,
    /// Categories loaded on activation; the selection must be one of them.
    pub categories: &'a [Category],
    /// Replacement image picked by the user, if any.
    pub new_image: Option<ImageUpload>,
    pub now: OffsetDateTime,
}

/// Validate and persist the form. Returns the product as saved.
///
/// `on_stage` is told when the upload and the record write begin.
///
/// # Errors
///
/// Validation errors ([`EditorError::Invalid`], [`EditorError::Image`]) are
/// returned before any service call. Upload and update failures abort the
/// remaining steps.
pub async fn save(
    store: &dyn DocumentStore,
    blobs: &dyn ObjectStore,
    request: SaveRequest<'_>,
    on_stage: &dyn Fn(SaveStage),
) -> Result<Product, EditorError> {
    let product_id = request.product_id.to_owned();
    let result = save_inner(store, blobs, request, on_stage).await;
    match &result {
        Ok(_) => tracing::info!(%product_id, "product updated"),
        Err(e) if e.is_validation() => tracing::debug!(%product_id, error = %e, "product form rejected"),
        Err(e) => tracing::error!(%product_id, error = %e, "error updating product"),
    }
    result
}

async fn save_inner(
    store: &dyn DocumentStore,
    blobs: &dyn ObjectStore,
    request: SaveRequest<'_>,
    on_stage: &dyn Fn(SaveStage),
) -> Result<Product, EditorError> {
    let SaveRequest { product_id, form, categories, new_image, now } = request;

    let validated = form.validate(categories)?;
    if let Some(upload) = &new_image {
        upload.validate()?;
    }
    let updated_at = now
        .format(&Rfc3339)
        .map_err(|e| EditorError::Timestamp(e.to_string()))?;

    let (image, uploaded) = match new_image {
        Some(upload) => {
            on_stage(SaveStage::UploadingImage);
            let path = product_image_path(now.unix_timestamp_nanos() / 1_000_000, &upload.file_name);
            let image = upload_image(blobs, &path, upload).await?;
            remove_replaced_image(blobs, form.image.as_ref(), &path).await;
            (Some(image), true)
        }
        None => (form.image.clone(), false),
    };

    on_stage(SaveStage::Saving);
    let fields = validated.to_fields(image.as_ref(), &updated_at);
    if let Err(e) = store.update(PRODUCTS, product_id, fields).await {
        if let Some(path) = image.as_ref().and_then(|i| i.path.as_deref()).filter(|_| uploaded) {
            tracing::warn!(%product_id, %path, "uploaded image left orphaned by failed update");
        }
        return Err(EditorError::Update(e));
    }

    Ok(Product {
        id: product_id.to_owned(),
        name: validated.name,
        description: validated.description,
        price: Some(validated.price),
        stock: Some(validated.stock),
        category_id: validated.category_id,
        category: validated.category_name,
        image,
        updated_at: Some(updated_at),
    })
}

/// Store the blob and resolve its URL.
async fn upload_image(blobs: &dyn ObjectStore, path: &str, upload: ImageUpload) -> Result<StoredImage, EditorError> {
    let ImageUpload { content_type, bytes, .. } = upload;
    blobs
        .put(path, bytes, &content_type)
        .await
        .map_err(EditorError::Upload)?;
    let url = blobs.download_url(path).await.map_err(EditorError::Upload)?;
    Ok(StoredImage::uploaded(path, url))
}

/// Best-effort removal of the blob the new upload replaces. Never fails.
async fn remove_replaced_image(blobs: &dyn ObjectStore, previous: Option<&StoredImage>, new_path: &str) {
    let Some(previous) = previous else {
        return;
    };
    let path = match &previous.path {
        Some(path) => path.clone(),
        None => match blobs.path_from_url(&previous.url) {
            Some(path) => path,
            None => {
                tracing::warn!(url = %previous.url, "previous image URL not recognized; left in place");
                return;
            }
        },
    };
    if path == new_path {
        return;
    }
    if let Err(e) = blobs.delete(&path).await {
        tracing::warn!(%path, error = %e, "error deleting old image");
    }
}
