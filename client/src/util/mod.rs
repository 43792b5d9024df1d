//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page logic to
//! improve reuse and testability.

pub mod auth;
pub mod clock;
#[cfg(feature = "hydrate")]
pub mod files;
pub mod session;
