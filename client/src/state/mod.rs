//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `backend`) so pages can depend on small
//! focused models. Form state is local to each page.

pub mod auth;
pub mod backend;
