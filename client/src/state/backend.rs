//! Hosted-service configuration fetched from the server at startup.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use catalog::BackendConfig;

/// Provided as `RwSignal<BackendState>` context. Pages wait for `config`
/// before building service clients.
#[derive(Clone, Debug, Default)]
pub struct BackendState {
    pub config: Option<BackendConfig>,
    pub error: Option<String>,
}

impl BackendState {
    /// Startup failed and no config will arrive.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.config.is_none() && self.error.is_some()
    }
}
