//! Firestore REST client implementing [`DocumentStore`].
//!
//! DESIGN
//! ======
//! The REST API wraps every field in a typed value object
//! (`{"stringValue": "x"}`, `{"integerValue": "7"}`, ...). Callers only ever
//! see plain JSON maps; `encode_value` / `decode_value` translate at the edge.
//! The pure encode/decode/parse functions carry the behavior and are tested
//! without a network.

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::config::{BackendConfig, normalize_base_url};
use crate::http::{build_client, read_response};
use crate::model::Record;
use crate::store::{Document, DocumentStore, StoreError};

const LIST_PAGE_SIZE: u32 = 300;

// =============================================================================
// CLIENT
// =============================================================================

pub struct FirestoreClient {
    http: reqwest::Client,
    documents_url: String,
    api_key: String,
    id_token: Option<String>,
}

impl FirestoreClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, StoreError> {
        let http = build_client(config.timeout_secs).map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            documents_url: documents_root(&config.firestore_url, &config.project_id),
            api_key: config.api_key.clone(),
            id_token: None,
        })
    }

    /// Send requests as the signed-in user.
    #[must_use]
    pub fn with_id_token(mut self, id_token: &str) -> Self {
        self.id_token = Some(id_token.to_owned());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.query(&[("key", self.api_key.as_str())]);
        match &self.id_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentStore for FirestoreClient {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = document_url(&self.documents_url, collection, Some(id))?;
        tracing::debug!(%collection, %id, "firestore get");
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let (status, body) = read_response(response)
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        match status {
            200 => parse_document(&body).map(Some),
            404 => Ok(None),
            _ => Err(StoreError::Status { status, body }),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = document_url(&self.documents_url, collection, None)?;
        tracing::debug!(%collection, "firestore list");
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .authorize(self.http.get(url.clone()))
                .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Request(e.to_string()))?;
            let (status, body) = read_response(response)
                .await
                .map_err(|e| StoreError::Request(e.to_string()))?;
            if status != 200 {
                return Err(StoreError::Status { status, body });
            }
            let page = parse_list_page(&body)?;
            documents.extend(page.documents);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(documents)
    }

    async fn update(&self, collection: &str, id: &str, fields: Record) -> Result<(), StoreError> {
        let url = document_url(&self.documents_url, collection, Some(id))?;
        tracing::debug!(%collection, %id, fields = fields.len(), "firestore update");
        let query = update_query(&fields);
        let response = self
            .authorize(self.http.patch(url))
            .query(&query)
            .json(&encode_fields(&fields))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let (status, body) = read_response(response)
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        if status != 200 {
            return Err(StoreError::Status { status, body });
        }
        Ok(())
    }
}

// =============================================================================
// URLS
// =============================================================================

fn documents_root(base_url: &str, project_id: &str) -> String {
    format!(
        "{}/v1/projects/{project_id}/databases/(default)/documents",
        normalize_base_url(base_url)
    )
}

/// URL of a collection, or of one document when `id` is given. Collection and
/// document identifiers are escaped as single path segments.
fn document_url(root: &str, collection: &str, id: Option<&str>) -> Result<reqwest::Url, StoreError> {
    let mut url = reqwest::Url::parse(root).map_err(|e| StoreError::Request(format!("invalid url {root}: {e}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| StoreError::Request(format!("url cannot be a base: {root}")))?;
        segments.push(collection);
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}

/// Query pairs for a partial update: one mask entry per field plus a
/// precondition so the update never creates a document.
fn update_query(fields: &Record) -> Vec<(&'static str, String)> {
    let mut query: Vec<(&'static str, String)> =
        fields.keys().map(|key| ("updateMask.fieldPaths", key.clone())).collect();
    query.push(("currentDocument.exists", "true".to_owned()));
    query
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireListPage {
    #[serde(default)]
    documents: Vec<WireDocument>,
    next_page_token: Option<String>,
}

struct ListPage {
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_document(json: &str) -> Result<Document, StoreError> {
    let wire: WireDocument = serde_json::from_str(json).map_err(|e| StoreError::Parse(e.to_string()))?;
    from_wire(wire)
}

fn parse_list_page(json: &str) -> Result<ListPage, StoreError> {
    let wire: WireListPage = serde_json::from_str(json).map_err(|e| StoreError::Parse(e.to_string()))?;
    let documents = wire
        .documents
        .into_iter()
        .map(from_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ListPage { documents, next_page_token: wire.next_page_token })
}

fn from_wire(wire: WireDocument) -> Result<Document, StoreError> {
    let id = document_id(&wire.name).to_owned();
    Ok(Document { id, fields: decode_fields(&wire.fields)? })
}

/// Last path segment of a full resource name
/// (`projects/p/databases/(default)/documents/products/abc` -> `abc`).
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

// =============================================================================
// VALUE CODEC
// =============================================================================

/// Wrap a plain record as a `{"fields": {...}}` request body.
#[must_use]
pub fn encode_fields(fields: &Record) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    json!({ "fields": encoded })
}

/// Convert a plain JSON value to its typed REST representation.
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or(0.0) })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            if values.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                json!({ "arrayValue": { "values": values } })
            }
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(key, value)| (key.clone(), encode_value(value)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode a map of typed values into a plain record.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] on the first value that is not a known
/// typed value.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Record, StoreError> {
    fields
        .iter()
        .map(|(key, value)| decode_value(value).map(|v| (key.clone(), v)))
        .collect()
}

/// Convert one typed REST value to plain JSON.
///
/// Timestamps, references and bytes become strings; geo points become
/// `{latitude, longitude}` objects; non-finite doubles become `null`.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] for unknown value kinds or malformed
/// payloads (e.g. an `integerValue` that is not an integer).
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some(obj) = value.as_object() else {
        return Err(StoreError::Decode(format!("expected typed value object, got {value}")));
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Err(StoreError::Decode("empty typed value".to_owned()));
    };
    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| StoreError::Decode(format!("bad booleanValue: {inner}"))),
        "integerValue" => decode_integer(inner),
        "doubleValue" => Ok(decode_double(inner)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_owned()))
            .ok_or_else(|| StoreError::Decode(format!("bad {kind}: {inner}"))),
        "geoPointValue" => Ok(json!({
            "latitude": inner.get("latitude").and_then(Value::as_f64).unwrap_or(0.0),
            "longitude": inner.get("longitude").and_then(Value::as_f64).unwrap_or(0.0),
        })),
        "arrayValue" => {
            let values = match inner.get("values").and_then(Value::as_array) {
                Some(values) => values.iter().map(decode_value).collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields").and_then(Value::as_object) {
                Some(fields) => decode_fields(fields)?,
                None => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        other => Err(StoreError::Decode(format!("unknown value kind: {other}"))),
    }
}

fn decode_integer(inner: &Value) -> Result<Value, StoreError> {
    let parsed = match inner {
        Value::String(s) => s.parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    };
    parsed
        .map(Value::from)
        .ok_or_else(|| StoreError::Decode(format!("bad integerValue: {inner}")))
}

fn decode_double(inner: &Value) -> Value {
    let parsed = match inner {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}
