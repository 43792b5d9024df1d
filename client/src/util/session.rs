//! Browser `sessionStorage` persistence of the signed-in session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session survives reloads within one tab and is dropped when the tab
//! closes. Only the provider tokens are stored; never the password. A stored
//! session whose token has expired is dropped on load, so the guards send the
//! user back to login instead of failing every service call.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use catalog::Session;
use time::OffsetDateTime;

/// Storage key of the serialized session.
pub const SESSION_KEY: &str = "storefront-admin.session";

/// Parse a stored session. Anything unreadable or expired at `now` counts
/// as signed out.
#[must_use]
pub fn decode_session(raw: &str, now: OffsetDateTime) -> Option<Session> {
    serde_json::from_str::<Session>(raw)
        .ok()
        .filter(|s| !s.id_token.is_empty() && !s.is_expired(now))
}

/// Load the stored session for this tab.
pub fn load() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.session_storage().ok().flatten())?;
        let raw = storage.get_item(SESSION_KEY).ok().flatten()?;
        let session = decode_session(&raw, crate::util::clock::now());
        if session.is_none() {
            let _ = storage.remove_item(SESSION_KEY);
        }
        session
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Store the session for this tab.
pub fn save(session: &Session) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.session_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        let _ = storage.set_item(SESSION_KEY, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// Forget the stored session.
pub fn clear() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.session_storage().ok().flatten()) {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
