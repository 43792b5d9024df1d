//! Authentication seam: email + password sign-in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A session this close to expiry is treated as already expired.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Errors produced by the authentication provider.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in request failed: {0}")]
    Request(String),

    /// The provider refused the credential (wrong password, unknown user,
    /// disabled account, throttling). The provider message is kept for logs.
    #[error("sign-in rejected: status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("sign-in response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Tokens returned by a successful sign-in. Never contains the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
    /// Lifetime of `id_token` in seconds.
    pub expires_in: u64,
    /// Unix seconds when the token was issued; 0 when never stamped.
    #[serde(default)]
    pub issued_at: i64,
}

impl Session {
    /// Record when the token was issued.
    #[must_use]
    pub fn issued(mut self, at: OffsetDateTime) -> Self {
        self.issued_at = at.unix_timestamp();
        self
    }

    /// True once `id_token` is expired or within [`EXPIRY_MARGIN_SECS`] of it.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        let lifetime = i64::try_from(self.expires_in).unwrap_or(i64::MAX);
        let expires_at = self.issued_at.saturating_add(lifetime);
        now.unix_timestamp() >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}

/// External authentication provider.
#[async_trait::async_trait(?Send)]
pub trait AuthProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}
