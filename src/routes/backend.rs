//! Public backend config endpoint.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use axum::Json;
use axum::extract::State;
use catalog::BackendConfig;

use crate::state::AppState;

/// `GET /api/config`: the hosted-service settings the browser client needs.
pub async fn public_config(State(state): State<AppState>) -> Json<BackendConfig> {
    tracing::debug!(project_id = %state.backend.project_id, "serving backend config");
    Json(state.backend.as_ref().clone())
}
