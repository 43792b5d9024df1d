//! Firebase Storage REST client implementing [`ObjectStore`].
//!
//! Objects live under `{base}/v0/b/{bucket}/o/{path}` where the whole path,
//! slashes included, is one escaped segment. The download URL is the object
//! URL plus `alt=media` and the object's download token, so a download URL
//! can be mapped back to its path.

#[cfg(test)]
#[path = "cloud_storage_test.rs"]
mod cloud_storage_test;

use serde::Deserialize;

use crate::config::{BackendConfig, normalize_base_url};
use crate::http::{build_client, read_response};
use crate::storage::{ObjectStore, StorageError};

pub struct CloudStorageClient {
    http: reqwest::Client,
    bucket_url: String,
    id_token: Option<String>,
}

impl CloudStorageClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, StorageError> {
        let http = build_client(config.timeout_secs).map_err(|e| StorageError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            bucket_url: bucket_url(&config.storage_url, &config.storage_bucket),
            id_token: None,
        })
    }

    #[must_use]
    pub fn with_id_token(mut self, id_token: &str) -> Self {
        self.id_token = Some(id_token.to_owned());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.id_token {
            Some(token) => request.header("Authorization", format!("Firebase {token}")),
            None => request,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ObjectStore for CloudStorageClient {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let url = upload_url(&self.bucket_url, path)?;
        tracing::debug!(%path, size = bytes.len(), %content_type, "storage upload");
        let response = self
            .authorize(self.http.post(url))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        let (status, body) = read_response(response)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        if status != 200 {
            return Err(StorageError::Status { status, body });
        }
        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String, StorageError> {
        let url = object_url(&self.bucket_url, path)?;
        tracing::debug!(%path, "storage metadata");
        let response = self
            .authorize(self.http.get(url.clone()))
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        let (status, body) = read_response(response)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        if status != 200 {
            return Err(StorageError::Status { status, body });
        }
        let token = parse_download_token(&body)?.ok_or_else(|| StorageError::MissingToken(path.to_owned()))?;
        Ok(media_url(url, &token))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let url = object_url(&self.bucket_url, path)?;
        tracing::debug!(%path, "storage delete");
        let response = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        let (status, body) = read_response(response)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(StorageError::Status { status, body });
        }
        Ok(())
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        object_path_from_url(&self.bucket_url, url)
    }
}

// =============================================================================
// URLS
// =============================================================================

fn bucket_url(base_url: &str, bucket: &str) -> String {
    format!("{}/v0/b/{bucket}/o", normalize_base_url(base_url))
}

fn parse_url(raw: &str) -> Result<reqwest::Url, StorageError> {
    reqwest::Url::parse(raw).map_err(|e| StorageError::InvalidUrl(format!("{raw}: {e}")))
}

/// `{bucket_url}/{escaped path}`.
fn object_url(bucket_url: &str, path: &str) -> Result<reqwest::Url, StorageError> {
    let mut url = parse_url(bucket_url)?;
    url.path_segments_mut()
        .map_err(|()| StorageError::InvalidUrl(bucket_url.to_owned()))?
        .push(path);
    Ok(url)
}

/// `{bucket_url}?uploadType=media&name={path}`.
fn upload_url(bucket_url: &str, path: &str) -> Result<reqwest::Url, StorageError> {
    let mut url = parse_url(bucket_url)?;
    url.query_pairs_mut()
        .append_pair("uploadType", "media")
        .append_pair("name", path);
    Ok(url)
}

/// Inverse of [`object_url`]: the object path of a URL under `bucket_url`,
/// query ignored. Any other origin, bucket or shape yields `None`.
fn object_path_from_url(bucket_url: &str, url: &str) -> Option<String> {
    let bucket = reqwest::Url::parse(bucket_url).ok()?;
    let url = reqwest::Url::parse(url).ok()?;
    if url.origin() != bucket.origin() {
        return None;
    }
    let prefix = format!("{}/", bucket.path().trim_end_matches('/'));
    let escaped = url.path().strip_prefix(&prefix)?;
    if escaped.is_empty() || escaped.contains('/') {
        return None;
    }
    percent_decode(escaped).filter(|path| !path.is_empty())
}

/// Decode `%XX` escapes. Invalid escapes or non-UTF-8 results yield `None`.
fn percent_decode(escaped: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(escaped.len());
    let mut rest = escaped.as_bytes();
    while let Some((&b, tail)) = rest.split_first() {
        if b == b'%' {
            let hex = tail.get(..2)?;
            let hex = std::str::from_utf8(hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(b);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok()
}

fn media_url(mut object_url: reqwest::Url, token: &str) -> String {
    object_url
        .query_pairs_mut()
        .append_pair("alt", "media")
        .append_pair("token", token);
    object_url.into()
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    download_tokens: Option<String>,
}

/// First download token from object metadata; the field holds a
/// comma-separated list.
fn parse_download_token(json: &str) -> Result<Option<String>, StorageError> {
    let meta: ObjectMetadata = serde_json::from_str(json).map_err(|e| StorageError::Parse(e.to_string()))?;
    Ok(meta
        .download_tokens
        .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()).map(str::to_owned)))
}
