//! Login flow: per-field credential validation, sign-in, return path.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;

use crate::auth::{AuthError, AuthProvider, Session};

/// Banner text for any rejected sign-in, whatever the provider said.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Failed to sign in. Please check your credentials.";

/// Landing route when no usable return path was given.
pub const DEFAULT_REDIRECT: &str = "/";

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Raw login form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Inline message per field; `None` when the field is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("login form invalid: {0:?}")]
    Invalid(FieldErrors),

    #[error("sign-in failed: {0}")]
    Auth(#[from] AuthError),
}

impl LoginError {
    /// Banner text. Field errors are shown inline, so they have none.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Invalid(_) => None,
            Self::Auth(_) => Some(SIGN_IN_FAILED_MESSAGE),
        }
    }
}

/// `None` when the address is acceptable.
#[must_use]
pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some("Email is required");
    }
    let valid = EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email));
    if valid { None } else { Some("Please enter a valid email address") }
}

/// `None` when the password is acceptable.
#[must_use]
pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Some("Password must be at least 6 characters");
    }
    None
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        FieldErrors { email: validate_email(&self.email), password: validate_password(&self.password) }
    }
}

/// Validate, then sign in with the raw credential. The session is stamped
/// as issued at `now`.
///
/// # Errors
///
/// [`LoginError::Invalid`] without any provider call when a field fails
/// validation; [`LoginError::Auth`] when the provider rejects the credential
/// or cannot be reached.
pub async fn submit(auth: &dyn AuthProvider, form: &LoginForm, now: OffsetDateTime) -> Result<Session, LoginError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(LoginError::Invalid(errors));
    }
    match auth.sign_in_with_password(&form.email, &form.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user_id, "signed in");
            Ok(session.issued(now))
        }
        Err(e) => {
            tracing::error!(error = %e, "error signing in");
            Err(LoginError::Auth(e))
        }
    }
}

/// Return path after sign-in. Only same-site absolute paths are honored.
#[must_use]
pub fn redirect_target(requested: Option<&str>) -> String {
    match requested {
        Some(path) if is_local_path(path) => path.to_owned(),
        _ => DEFAULT_REDIRECT.to_owned(),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

/// Login URL that returns to `path` after sign-in.
#[must_use]
pub fn login_url(path: &str) -> String {
    let Ok(mut url) = reqwest::Url::parse(LOGIN_BASE) else {
        return "/login".to_owned();
    };
    url.query_pairs_mut().append_pair("redirect", path);
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    }
}

const LOGIN_BASE: &str = "http://localhost/login";
