use super::*;

const BUCKET: &str = "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o";

#[test]
fn bucket_url_joins_base_and_bucket() {
    assert_eq!(bucket_url("https://firebasestorage.googleapis.com/", "shop.appspot.com"), BUCKET);
}

#[test]
fn object_url_escapes_slashes_in_path() {
    let url = object_url(BUCKET, "products/1700000000000_shirt.png").unwrap();
    assert_eq!(url.as_str(), format!("{BUCKET}/products%2F1700000000000_shirt.png"));
}

#[test]
fn upload_url_carries_name_query() {
    let url = upload_url(BUCKET, "products/a b.png").unwrap();
    assert_eq!(url.as_str(), format!("{BUCKET}?uploadType=media&name=products%2Fa+b.png"));
}

#[test]
fn media_url_appends_alt_and_token() {
    let url = object_url(BUCKET, "products/x.png").unwrap();
    assert_eq!(media_url(url, "tok-1"), format!("{BUCKET}/products%2Fx.png?alt=media&token=tok-1"));
}

#[test]
fn parse_download_token_takes_first_token() {
    let body = r#"{"name":"products/x.png","bucket":"shop.appspot.com","downloadTokens":"t1,t2"}"#;
    assert_eq!(parse_download_token(body).unwrap().as_deref(), Some("t1"));
}

#[test]
fn parse_download_token_absent() {
    assert_eq!(parse_download_token(r#"{"name":"products/x.png"}"#).unwrap(), None);
    assert_eq!(parse_download_token(r#"{"downloadTokens":""}"#).unwrap(), None);
}

#[test]
fn parse_download_token_rejects_invalid_json() {
    assert!(matches!(parse_download_token("<html>"), Err(StorageError::Parse(_))));
}

#[test]
fn object_path_from_download_url() {
    let url = format!("{BUCKET}/products%2F1_old.png?alt=media&token=t");
    assert_eq!(object_path_from_url(BUCKET, &url).as_deref(), Some("products/1_old.png"));
}

#[test]
fn object_path_inverts_object_url() {
    let path = "products/1700000000000_red shirt+1.png";
    let url = media_url(object_url(BUCKET, path).unwrap(), "tok");
    assert_eq!(object_path_from_url(BUCKET, &url).as_deref(), Some(path));
}

#[test]
fn object_path_rejects_foreign_urls() {
    for url in [
        "https://cdn.example.com/v0/b/shop.appspot.com/o/products%2Fa.png?alt=media",
        "https://firebasestorage.googleapis.com/v0/b/other.appspot.com/o/products%2Fa.png",
        "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o/products/a.png",
        "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o/",
        "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o/bad%zz",
        "not a url",
    ] {
        assert_eq!(object_path_from_url(BUCKET, url), None, "{url}");
    }
}
