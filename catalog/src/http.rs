//! HTTP client construction shared by the REST service clients.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Build a `reqwest` client honoring the configured request timeout.
///
/// The browser fetch backend has no client-level timeouts, so the value is
/// only applied on native targets.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .build()
    }
    #[cfg(target_arch = "wasm32")]
    {
        let _ = timeout_secs;
        reqwest::Client::builder().build()
    }
}

/// Read a response into `(status, body)`.
pub(crate) async fn read_response(response: reqwest::Response) -> Result<(u16, String), reqwest::Error> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}
