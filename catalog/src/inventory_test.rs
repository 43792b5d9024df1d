use serde_json::json;

use super::*;
use crate::testing::MemoryStore;

#[tokio::test]
async fn lists_products_sorted_by_name() {
    let store = MemoryStore::new();
    store.insert(PRODUCTS, "p2", json!({ "name": "mug", "price": 8.5 }));
    store.insert(PRODUCTS, "p1", json!({ "name": "Shirt", "price": 19.99 }));
    store.insert(PRODUCTS, "p3", json!({ "name": "Apron" }));
    store.insert("categories", "c1", json!({ "name": "Apparel" }));

    let products = list_products(&store).await.unwrap();
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Apron", "mug", "Shirt"]);
}

#[tokio::test]
async fn list_failure_is_returned() {
    let mut store = MemoryStore::new();
    store.fail_list = true;
    assert!(list_products(&store).await.is_err());
}

#[test]
fn edit_path_points_at_editor_route() {
    assert_eq!(edit_path("p1"), "/admin/products/p1/edit");
}

#[test]
fn edit_path_escapes_id_as_one_segment() {
    assert_eq!(edit_path("a/b?c#d"), "/admin/products/a%2Fb%3Fc%23d/edit");
    assert_eq!(edit_path("red shirt"), "/admin/products/red%20shirt/edit");
}

#[test]
fn format_price_uses_two_decimals() {
    assert_eq!(format_price(Some(19.9)), "19.90");
    assert_eq!(format_price(None), "-");
}
