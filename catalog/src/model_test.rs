use super::*;
use serde_json::json;

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[test]
fn product_from_record_reads_every_field() {
    let rec = record(json!({
        "name": "Shirt",
        "description": "Cotton",
        "price": 19.99,
        "stock": 4,
        "categoryId": "c1",
        "category": "Apparel",
        "imageUrl": "https://img/1",
        "imagePath": "products/1_shirt.png",
        "updatedAt": "2024-01-02T03:04:05Z",
    }));
    let product = Product::from_record("p1", &rec);
    assert_eq!(product.id, "p1");
    assert_eq!(product.name, "Shirt");
    assert_eq!(product.description, "Cotton");
    assert_eq!(product.price, Some(19.99));
    assert_eq!(product.stock, Some(4));
    assert_eq!(product.category_id, "c1");
    assert_eq!(product.category, "Apparel");
    assert_eq!(
        product.image,
        Some(StoredImage { url: "https://img/1".to_owned(), path: Some("products/1_shirt.png".to_owned()) })
    );
    assert_eq!(product.updated_at.as_deref(), Some("2024-01-02T03:04:05Z"));
}

#[test]
fn product_from_record_defaults_missing_fields() {
    let product = Product::from_record("p2", &Record::new());
    assert_eq!(product.name, "");
    assert_eq!(product.price, None);
    assert_eq!(product.stock, None);
    assert!(product.image.is_none());
    assert_eq!(product.image_url(), "");
    assert!(product.updated_at.is_none());
}

#[test]
fn product_from_record_accepts_numeric_strings() {
    let rec = record(json!({ "price": "12.50", "stock": "7" }));
    let product = Product::from_record("p3", &rec);
    assert_eq!(product.price, Some(12.5));
    assert_eq!(product.stock, Some(7));
}

#[test]
fn product_from_record_accepts_whole_float_stock() {
    let rec = record(json!({ "stock": 3.0 }));
    assert_eq!(Product::from_record("p", &rec).stock, Some(3));
}

#[test]
fn image_without_path_keeps_url_only() {
    let rec = record(json!({ "imageUrl": "https://img/legacy", "imagePath": "" }));
    let product = Product::from_record("p4", &rec);
    assert_eq!(product.image, Some(StoredImage { url: "https://img/legacy".to_owned(), path: None }));
    assert_eq!(product.image_url(), "https://img/legacy");
}

#[test]
fn path_without_url_is_no_image() {
    let rec = record(json!({ "imagePath": "products/a.png" }));
    assert!(Product::from_record("p5", &rec).image.is_none());
}

#[test]
fn find_category_matches_by_id() {
    let categories = vec![
        Category { id: "a".to_owned(), name: "Shoes".to_owned() },
        Category { id: "b".to_owned(), name: "Hats".to_owned() },
    ];
    assert_eq!(find_category(&categories, "b").map(|c| c.name.as_str()), Some("Hats"));
    assert!(find_category(&categories, "z").is_none());
}
