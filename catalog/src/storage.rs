//! Object store seam: write a blob, resolve its download URL, delete it, and
//! map a download URL back to its path.

/// Errors produced by object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(String),

    #[error("object store returned status {status}")]
    Status { status: u16, body: String },

    #[error("storage response parse failed: {0}")]
    Parse(String),

    /// Object metadata carried no download token, so no URL can be built.
    #[error("no download token for {0}")]
    MissingToken(String),

    #[error("invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Hosted blob storage addressed by path.
#[async_trait::async_trait(?Send)]
pub trait ObjectStore {
    /// Store `bytes` at `path`, replacing any existing blob.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Resolve the public retrieval URL of the blob at `path`.
    async fn download_url(&self, path: &str) -> Result<String, StorageError>;

    /// Remove the blob at `path`.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Path of the blob a download URL from this store points at. `None` when
    /// the URL is not one of this store's download URLs.
    fn path_from_url(&self, url: &str) -> Option<String>;
}
