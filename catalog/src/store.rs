//! Document store seam: get-by-id, list-all, update-by-id.

use crate::model::Record;

/// Errors produced by document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("document request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("document store returned status {status}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON of the expected shape.
    #[error("document response parse failed: {0}")]
    Parse(String),

    /// A typed field value could not be converted into plain JSON.
    #[error("document field decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A stored document: identifier plus its fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Record,
}

/// Hosted document database addressed by collection name and identifier.
#[async_trait::async_trait(?Send)]
pub trait DocumentStore {
    /// Fetch one document. `Ok(None)` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Fetch every document in a collection.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Overwrite the given fields of an existing document, leaving other
    /// fields untouched. Fails if the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Record) -> Result<(), StoreError>;
}
