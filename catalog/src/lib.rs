//! Shared storefront model and admin flows.
//!
//! This crate owns everything the admin console does that is not markup:
//! the product/category record model, form validation, the three hosted
//! service seams (document store, object store, password sign-in) with their
//! REST clients, and the product-editor and login flows built on top of them.
//!
//! DESIGN
//! ======
//! Flows take the service traits as `&dyn` arguments so the `client` crate can
//! hand in REST clients while tests hand in in-memory fakes. Every trait is
//! `?Send` because browser futures are not `Send`.

pub mod auth;
pub mod cloud_storage;
pub mod config;
pub mod editor;
pub mod firestore;
pub mod identity;
pub mod image;
pub mod inventory;
pub mod login;
pub mod model;
pub mod storage;
pub mod store;

mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthError, AuthProvider, Session};
pub use config::BackendConfig;
pub use model::{Category, Product, Record, StoredImage};
pub use storage::{ObjectStore, StorageError};
pub use store::{DocumentStore, StoreError};
