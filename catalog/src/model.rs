//! Product and category records as stored in the document store.
//!
//! DESIGN
//! ======
//! Documents are plain key/value maps (`Record`). The typed structs here are
//! tolerant readers: a missing or mistyped field falls back to an empty value
//! instead of failing the whole load, because records are created by other
//! tools and older records lack newer fields such as `imagePath`.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A plain key/value document payload.
pub type Record = Map<String, Value>;

/// Collection holding product documents.
pub const PRODUCTS: &str = "products";
/// Collection holding category documents.
pub const CATEGORIES: &str = "categories";

// =============================================================================
// FIELD NAMES
// =============================================================================

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_STOCK: &str = "stock";
pub const FIELD_CATEGORY_ID: &str = "categoryId";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_IMAGE_URL: &str = "imageUrl";
pub const FIELD_IMAGE_PATH: &str = "imagePath";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

// =============================================================================
// PRODUCT
// =============================================================================

/// A product document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Document identifier.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price; `None` when the stored value is missing or not numeric.
    pub price: Option<f64>,
    /// Units in stock; `None` when missing.
    pub stock: Option<i64>,
    /// Identifier of the category document.
    pub category_id: String,
    /// Denormalized category display name.
    pub category: String,
    /// Current product image, `None` when the product has no image.
    pub image: Option<StoredImage>,
    /// RFC 3339 timestamp of the last save, if any.
    pub updated_at: Option<String>,
}

impl Product {
    /// Build a product from a stored document.
    #[must_use]
    pub fn from_record(id: &str, record: &Record) -> Self {
        Self {
            id: id.to_owned(),
            name: string_field(record, FIELD_NAME),
            description: string_field(record, FIELD_DESCRIPTION),
            price: record.get(FIELD_PRICE).and_then(number_as_f64),
            stock: record.get(FIELD_STOCK).and_then(number_as_i64),
            category_id: string_field(record, FIELD_CATEGORY_ID),
            category: string_field(record, FIELD_CATEGORY),
            image: stored_image(record),
            updated_at: record
                .get(FIELD_UPDATED_AT)
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    /// Retrieval URL of the current image, empty when there is none.
    #[must_use]
    pub fn image_url(&self) -> &str {
        self.image.as_ref().map_or("", |image| image.url.as_str())
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// A category document. Read-only for the admin flows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn from_record(id: &str, record: &Record) -> Self {
        Self { id: id.to_owned(), name: string_field(record, FIELD_NAME) }
    }
}

/// Look up a category by identifier.
#[must_use]
pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

// =============================================================================
// STORED IMAGE
// =============================================================================

/// A product image: its retrieval URL and, when recorded, its object-store
/// path. Records written by other tools carry only the URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub path: Option<String>,
}

impl StoredImage {
    /// An image this console uploaded, path known.
    #[must_use]
    pub fn uploaded(path: &str, url: String) -> Self {
        Self { url, path: Some(path.to_owned()) }
    }
}

/// Image fields of a record. An empty URL means no image.
fn stored_image(record: &Record) -> Option<StoredImage> {
    let url = string_field(record, FIELD_IMAGE_URL);
    if url.is_empty() {
        return None;
    }
    let path = string_field(record, FIELD_IMAGE_PATH);
    Some(StoredImage { url, path: (!path.is_empty()).then_some(path) })
}

// =============================================================================
// FIELD HELPERS
// =============================================================================

fn string_field(record: &Record, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn number_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
