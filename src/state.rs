//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host keeps no product data; it only hands the public backend config to
//! browsers.

use std::sync::Arc;

use catalog::BackendConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: BackendConfig) -> Self {
        Self { backend: Arc::new(backend) }
    }
}
