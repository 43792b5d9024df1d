use super::*;

// =============================================================================
// encode_value
// =============================================================================

#[test]
fn encode_integer_as_decimal_string() {
    assert_eq!(encode_value(&json!(7)), json!({ "integerValue": "7" }));
    assert_eq!(encode_value(&json!(-3)), json!({ "integerValue": "-3" }));
}

#[test]
fn encode_float_as_double() {
    assert_eq!(encode_value(&json!(19.99)), json!({ "doubleValue": 19.99 }));
}

#[test]
fn encode_scalars() {
    assert_eq!(encode_value(&json!("Shirt")), json!({ "stringValue": "Shirt" }));
    assert_eq!(encode_value(&json!(true)), json!({ "booleanValue": true }));
    assert_eq!(encode_value(&Value::Null), json!({ "nullValue": null }));
}

#[test]
fn encode_nested_map_and_array() {
    let encoded = encode_value(&json!({ "tags": ["a", 1], "empty": [] }));
    assert_eq!(
        encoded,
        json!({
            "mapValue": { "fields": {
                "tags": { "arrayValue": { "values": [
                    { "stringValue": "a" },
                    { "integerValue": "1" }
                ] } },
                "empty": { "arrayValue": {} }
            } }
        })
    );
}

#[test]
fn encode_fields_wraps_body() {
    let mut fields = Record::new();
    fields.insert("stock".to_owned(), json!(0));
    assert_eq!(encode_fields(&fields), json!({ "fields": { "stock": { "integerValue": "0" } } }));
}

// =============================================================================
// decode_value
// =============================================================================

#[test]
fn decode_integer_from_string_and_number() {
    assert_eq!(decode_value(&json!({ "integerValue": "42" })).unwrap(), json!(42));
    assert_eq!(decode_value(&json!({ "integerValue": 42 })).unwrap(), json!(42));
}

#[test]
fn decode_integer_rejects_garbage() {
    let err = decode_value(&json!({ "integerValue": "4.2" })).unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[test]
fn decode_double_handles_non_finite() {
    assert_eq!(decode_value(&json!({ "doubleValue": 1.5 })).unwrap(), json!(1.5));
    assert_eq!(decode_value(&json!({ "doubleValue": "NaN" })).unwrap(), Value::Null);
}

#[test]
fn decode_timestamp_and_reference_as_strings() {
    assert_eq!(
        decode_value(&json!({ "timestampValue": "2024-01-01T00:00:00Z" })).unwrap(),
        json!("2024-01-01T00:00:00Z")
    );
    assert_eq!(
        decode_value(&json!({ "referenceValue": "projects/p/databases/(default)/documents/categories/c1" })).unwrap(),
        json!("projects/p/databases/(default)/documents/categories/c1")
    );
}

#[test]
fn decode_geo_point() {
    let decoded = decode_value(&json!({ "geoPointValue": { "latitude": 1.0, "longitude": 2.0 } })).unwrap();
    assert_eq!(decoded, json!({ "latitude": 1.0, "longitude": 2.0 }));
}

#[test]
fn decode_empty_array_and_map() {
    assert_eq!(decode_value(&json!({ "arrayValue": {} })).unwrap(), json!([]));
    assert_eq!(decode_value(&json!({ "mapValue": {} })).unwrap(), json!({}));
}

#[test]
fn decode_unknown_kind_errors() {
    let err = decode_value(&json!({ "mysteryValue": 1 })).unwrap_err();
    assert!(err.to_string().contains("mysteryValue"));
}

#[test]
fn decode_reverses_encode_for_nested_record() {
    let original = json!({ "name": "Shirt", "price": 19.99, "stock": 3, "meta": { "tags": ["x"] } });
    let decoded = decode_value(&encode_value(&original)).unwrap();
    assert_eq!(decoded, original);
}

// =============================================================================
// parsing + urls
// =============================================================================

#[test]
fn parse_document_takes_id_from_resource_name() {
    let body = r#"{
        "name": "projects/p/databases/(default)/documents/products/abc123",
        "fields": { "name": { "stringValue": "Shirt" }, "stock": { "integerValue": "2" } },
        "createTime": "2024-01-01T00:00:00Z",
        "updateTime": "2024-01-01T00:00:00Z"
    }"#;
    let doc = parse_document(body).unwrap();
    assert_eq!(doc.id, "abc123");
    assert_eq!(doc.fields.get("name"), Some(&json!("Shirt")));
    assert_eq!(doc.fields.get("stock"), Some(&json!(2)));
}

#[test]
fn parse_list_page_handles_missing_documents() {
    let page = parse_list_page("{}").unwrap();
    assert!(page.documents.is_empty());
    assert!(page.next_page_token.is_none());
}

#[test]
fn parse_list_page_reads_token() {
    let body = r#"{
        "documents": [
            { "name": "projects/p/databases/(default)/documents/categories/c1", "fields": { "name": { "stringValue": "Hats" } } },
            { "name": "projects/p/databases/(default)/documents/categories/c2" }
        ],
        "nextPageToken": "tok"
    }"#;
    let page = parse_list_page(body).unwrap();
    assert_eq!(page.documents.len(), 2);
    assert_eq!(page.documents[1].id, "c2");
    assert!(page.documents[1].fields.is_empty());
    assert_eq!(page.next_page_token.as_deref(), Some("tok"));
}

#[test]
fn parse_document_rejects_invalid_json() {
    assert!(matches!(parse_document("not json"), Err(StoreError::Parse(_))));
}

#[test]
fn document_url_escapes_segments() {
    let root = documents_root("https://firestore.googleapis.com/", "shop");
    let url = document_url(&root, "products", Some("a b/c")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://firestore.googleapis.com/v1/projects/shop/databases/(default)/documents/products/a%20b%2Fc"
    );
}

#[test]
fn collection_url_has_no_trailing_id() {
    let root = documents_root("http://localhost:8080", "demo");
    let url = document_url(&root, "categories", None).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/v1/projects/demo/databases/(default)/documents/categories");
}

#[test]
fn update_query_masks_every_field_and_requires_existence() {
    let mut fields = Record::new();
    fields.insert("name".to_owned(), json!("x"));
    fields.insert("stock".to_owned(), json!(1));
    let query = update_query(&fields);
    assert_eq!(
        query,
        vec![
            ("updateMask.fieldPaths", "name".to_owned()),
            ("updateMask.fieldPaths", "stock".to_owned()),
            ("currentDocument.exists", "true".to_owned()),
        ]
    );
}
