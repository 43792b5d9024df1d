use super::*;

#[tokio::test]
async fn public_config_returns_backend_settings() {
    let mut config = BackendConfig::new("shop", "web-key");
    config.storage_bucket = "shop-media".to_owned();
    let state = AppState::new(config.clone());

    let Json(body) = public_config(State(state)).await;
    assert_eq!(body, config);
}

#[tokio::test]
async fn public_config_serializes_expected_fields() {
    let state = AppState::new(BackendConfig::new("shop", "web-key"));
    let Json(body) = public_config(State(state)).await;

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["project_id"], "shop");
    assert_eq!(json["api_key"], "web-key");
    assert_eq!(json["storage_bucket"], "shop.appspot.com");
    assert_eq!(json["timeout_secs"], 30);
}

#[tokio::test]
async fn healthz_is_ok() {
    assert_eq!(super::super::healthz().await, axum::http::StatusCode::OK);
}
