//! REST helpers for the app's own server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error, since the config is only
//! needed in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use catalog::BackendConfig;

/// Endpoint serving the public hosted-service config.
pub const CONFIG_ENDPOINT: &str = "/api/config";

#[cfg(any(test, feature = "hydrate"))]
fn config_failed_message(status: u16) -> String {
    format!("config request failed: {status}")
}

/// Fetch the hosted-service config from [`CONFIG_ENDPOINT`].
///
/// # Errors
///
/// Returns an error string if the request fails, the server answers with a
/// non-success status, or the body is not a config.
pub async fn fetch_backend_config() -> Result<BackendConfig, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(config_failed_message(resp.status()));
        }
        resp.json::<BackendConfig>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
