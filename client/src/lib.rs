//! # client
//!
//! Leptos + WASM frontend of the storefront admin console.
//!
//! This crate contains the pages (login, product list, product editor),
//! shared reactive state, the `/api/config` fetch, and browser glue (session
//! storage, file reading). Model, validation, and the hosted-service flows
//! live in `catalog`; pages call them with REST clients built from the
//! backend config.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
