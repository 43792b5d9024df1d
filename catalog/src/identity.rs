//! Identity Toolkit REST client implementing [`AuthProvider`].

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, AuthProvider, Session};
use crate::config::{BackendConfig, normalize_base_url};
use crate::http::{build_client, read_response};

pub struct IdentityClient {
    http: reqwest::Client,
    sign_in_url: String,
    api_key: String,
}

impl IdentityClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, AuthError> {
        let http = build_client(config.timeout_secs).map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            sign_in_url: format!("{}/v1/accounts:signInWithPassword", normalize_base_url(&config.auth_url)),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait::async_trait(?Send)]
impl AuthProvider for IdentityClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let body = SignInRequest { email, password, return_secure_token: true };
        let response = self
            .http
            .post(&self.sign_in_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        let (status, text) = read_response(response)
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        if status != 200 {
            return Err(AuthError::Rejected { status, message: parse_error_message(&text) });
        }
        parse_session(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    id_token: String,
    /// Seconds, sent as a decimal string.
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_session(json: &str) -> Result<Session, AuthError> {
    let resp: SignInResponse = serde_json::from_str(json).map_err(|e| AuthError::Parse(e.to_string()))?;
    let expires_in = resp
        .expires_in
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(3600);
    Ok(Session {
        user_id: resp.local_id,
        email: resp.email,
        id_token: resp.id_token,
        expires_in,
        issued_at: 0,
    })
}

/// Provider error code (`INVALID_PASSWORD`, `EMAIL_NOT_FOUND`, ...) or the
/// raw body when it is not the usual envelope.
fn parse_error_message(json: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(json).map_or_else(|_| json.to_owned(), |envelope| envelope.error.message)
}
