//! In-memory fakes of the service traits for flow tests.
//!
//! Each fake records every call it receives so tests can assert both the
//! outcome and which network calls a flow made (or did not make).

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::auth::{AuthError, AuthProvider, Session};
use crate::model::Record;
use crate::storage::{ObjectStore, StorageError};
use crate::store::{Document, DocumentStore, StoreError};

// =============================================================================
// DOCUMENT STORE
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum StoreCall {
    Get { collection: String, id: String },
    List { collection: String },
    Update { collection: String, id: String, fields: Record },
}

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<(String, String), Record>>,
    calls: Mutex<Vec<StoreCall>>,
    pub fail_get: bool,
    pub fail_list: bool,
    pub fail_update: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, id: &str, fields: Value) {
        let record = fields.as_object().cloned().unwrap_or_default();
        self.docs
            .lock()
            .unwrap()
            .insert((collection.to_owned(), id.to_owned()), record);
    }

    pub fn record(&self, collection: &str, id: &str) -> Option<Record> {
        self.docs
            .lock()
            .unwrap()
            .get(&(collection.to_owned(), id.to_owned()))
            .cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<Record> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Update { fields, .. } => Some(fields),
                _ => None,
            })
            .collect()
    }

    fn failure() -> StoreError {
        StoreError::Status { status: 503, body: "unavailable".to_owned() }
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Get { collection: collection.to_owned(), id: id.to_owned() });
        if self.fail_get {
            return Err(Self::failure());
        }
        Ok(self
            .record(collection, id)
            .map(|fields| Document { id: id.to_owned(), fields }))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::List { collection: collection.to_owned() });
        if self.fail_list {
            return Err(Self::failure());
        }
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|((_, id), fields)| Document { id: id.clone(), fields: fields.clone() })
            .collect())
    }

    async fn update(&self, collection: &str, id: &str, fields: Record) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(StoreCall::Update {
            collection: collection.to_owned(),
            id: id.to_owned(),
            fields: fields.clone(),
        });
        if self.fail_update {
            return Err(Self::failure());
        }
        let mut docs = self.docs.lock().unwrap();
        let Some(existing) = docs.get_mut(&(collection.to_owned(), id.to_owned())) else {
            return Err(StoreError::Status { status: 404, body: "no document".to_owned() });
        };
        existing.extend(fields);
        Ok(())
    }
}

// =============================================================================
// OBJECT STORE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlobCall {
    Put { path: String, size: usize, content_type: String },
    DownloadUrl { path: String },
    Delete { path: String },
}

#[derive(Default)]
pub struct MemoryBlobs {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
    calls: Mutex<Vec<BlobCall>>,
    pub fail_put: bool,
    pub fail_delete: bool,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_for(path: &str) -> String {
        format!("https://blobs.test/{}?token=t", path.replace('/', "%2F"))
    }

    pub fn insert(&self, path: &str, bytes: &[u8]) {
        self.blobs.lock().unwrap().insert(path.to_owned(), bytes.to_vec());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(path)
    }

    pub fn calls(&self) -> Vec<BlobCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl ObjectStore for MemoryBlobs {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(BlobCall::Put {
            path: path.to_owned(),
            size: bytes.len(),
            content_type: content_type.to_owned(),
        });
        if self.fail_put {
            return Err(StorageError::Status { status: 403, body: "denied".to_owned() });
        }
        self.blobs.lock().unwrap().insert(path.to_owned(), bytes);
        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String, StorageError> {
        self.calls
            .lock()
            .unwrap()
            .push(BlobCall::DownloadUrl { path: path.to_owned() });
        if !self.contains(path) {
            return Err(StorageError::Status { status: 404, body: "no object".to_owned() });
        }
        Ok(Self::url_for(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.calls
            .lock()
            .unwrap()
            .push(BlobCall::Delete { path: path.to_owned() });
        if self.fail_delete {
            return Err(StorageError::Request("connection reset".to_owned()));
        }
        self.blobs.lock().unwrap().remove(path);
        Ok(())
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        let escaped = url.strip_prefix("https://blobs.test/")?.split('?').next()?;
        Some(escaped.replace("%2F", "/")).filter(|path| !path.is_empty())
    }
}

// =============================================================================
// AUTH
// =============================================================================

pub struct FakeAuth {
    email: String,
    password: String,
    calls: Mutex<Vec<String>>,
}

impl FakeAuth {
    /// Accepts exactly one credential.
    pub fn accepting(email: &str, password: &str) -> Self {
        Self { email: email.to_owned(), password: password.to_owned(), calls: Mutex::new(Vec::new()) }
    }

    /// Emails of every sign-in attempt.
    pub fn attempts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl AuthProvider for FakeAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.calls.lock().unwrap().push(email.to_owned());
        if email != self.email || password != self.password {
            return Err(AuthError::Rejected { status: 400, message: "INVALID_LOGIN_CREDENTIALS".to_owned() });
        }
        Ok(Session {
            user_id: "uid-1".to_owned(),
            email: email.to_owned(),
            id_token: "id-token".to_owned(),
            expires_in: 3600,
            issued_at: 0,
        })
    }
}
