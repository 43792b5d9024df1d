//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and route-scoped orchestration; validation
//! and service flows come from `catalog`.

pub mod login;
pub mod product_edit;
pub mod products;
