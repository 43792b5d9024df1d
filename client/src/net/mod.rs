//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to this app's own server; `services` builds the hosted-service
//! REST clients from the fetched config and runs the `catalog` flows.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod services;
