//! Product list for the admin landing view.

#[cfg(test)]
#[path = "inventory_test.rs"]
mod inventory_test;

use crate::model::{PRODUCTS, Product};
use crate::store::{DocumentStore, StoreError};

/// Banner text when the list cannot be read.
pub const LIST_FAILED_MESSAGE: &str = "Failed to load products";

/// Every product, ordered by name (case-insensitive) then identifier.
///
/// # Errors
///
/// Returns the store error when the list read fails.
pub async fn list_products(store: &dyn DocumentStore) -> Result<Vec<Product>, StoreError> {
    let docs = store.list(PRODUCTS).await.inspect_err(|e| {
        tracing::error!(error = %e, "error fetching products");
    })?;
    let mut products: Vec<Product> = docs
        .iter()
        .map(|doc| Product::from_record(&doc.id, &doc.fields))
        .collect();
    products.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    tracing::debug!(count = products.len(), "products loaded");
    Ok(products)
}

/// Route of the editor for one product. The id is escaped as one segment.
#[must_use]
pub fn edit_path(product_id: &str) -> String {
    let Ok(mut url) = reqwest::Url::parse(PRODUCTS_ROUTE_BASE) else {
        return "/admin/products".to_owned();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(product_id).push("edit");
    }
    url.path().to_owned()
}

const PRODUCTS_ROUTE_BASE: &str = "http://localhost/admin/products";

/// Price as shown in the list: two decimals, or a dash when unknown.
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_owned(), |p| format!("{p:.2}"))
}
