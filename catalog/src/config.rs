//! Public backend configuration shared by the host and the browser client.
//!
//! The host builds this from its environment and serves it at `/api/config`;
//! the client deserializes it and builds the REST service clients from it.
//! Everything in here is safe to expose to browsers.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, Session};
use crate::cloud_storage::CloudStorageClient;
use crate::firestore::FirestoreClient;
use crate::identity::IdentityClient;
use crate::storage::StorageError;
use crate::store::StoreError;

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_STORAGE_URL: &str = "https://firebasestorage.googleapis.com";
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub project_id: String,
    /// Web API key of the project (identifies the project, grants nothing).
    pub api_key: String,
    pub storage_bucket: String,
    pub firestore_url: String,
    pub storage_url: String,
    pub auth_url: String,
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Config pointing at the hosted production endpoints, with the default
    /// `{project}.appspot.com` bucket.
    #[must_use]
    pub fn new(project_id: &str, api_key: &str) -> Self {
        Self {
            project_id: project_id.to_owned(),
            api_key: api_key.to_owned(),
            storage_bucket: default_bucket(project_id),
            firestore_url: DEFAULT_FIRESTORE_URL.to_owned(),
            storage_url: DEFAULT_STORAGE_URL.to_owned(),
            auth_url: DEFAULT_AUTH_URL.to_owned(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Document store client, authorized as `session` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn document_store(&self, session: Option<&Session>) -> Result<FirestoreClient, StoreError> {
        let client = FirestoreClient::new(self)?;
        Ok(match session {
            Some(s) => client.with_id_token(&s.id_token),
            None => client,
        })
    }

    /// Object store client, authorized as `session` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn object_store(&self, session: Option<&Session>) -> Result<CloudStorageClient, StorageError> {
        let client = CloudStorageClient::new(self)?;
        Ok(match session {
            Some(s) => client.with_id_token(&s.id_token),
            None => client,
        })
    }

    /// Password sign-in client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn auth_provider(&self) -> Result<IdentityClient, AuthError> {
        IdentityClient::new(self)
    }
}

#[must_use]
pub fn default_bucket(project_id: &str) -> String {
    format!("{project_id}.appspot.com")
}

/// Strip trailing slashes so endpoint joins never produce `//`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
