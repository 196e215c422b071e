//! Document-store seam and the Firestore REST binding behind it.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the store reports itself unavailable, since allow-list
//! initialization only runs after hydration.
//!
//! WIRE FORMAT
//! ===========
//! Firestore wraps every value in a single-key type tag
//! (`{"stringValue": ".."}`, `{"arrayValue": {"values": [..]}}`, ...).
//! `encode_fields` / `decode_fields` translate between that and plain JSON so
//! callers only ever see `serde_json::Value` documents.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::firebase::FirebaseConfig;

/// Failure talking to the document store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document request failed: {0}")]
    Request(String),

    #[error("document request failed: status {0}")]
    Status(u16),

    #[error("document decode failed: {0}")]
    Decode(String),

    #[error("document store unavailable")]
    Unavailable,
}

/// Key/value document storage addressed by `collection/id`.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Fetch a document's data, or `None` if it does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Create or replace a document's data.
    async fn set_document(&self, collection: &str, id: &str, data: &Value) -> Result<(), StoreError>;
}

/// Firestore document resource as returned by the REST API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Encode a plain JSON object into Firestore `fields`.
///
/// Non-object input encodes as an empty field map.
pub fn encode_fields(data: &Value) -> Map<String, Value> {
    match data {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect(),
        _ => Map::new(),
    }
}

/// Decode Firestore `fields` into a plain JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(fields.iter().map(|(k, v)| (k.clone(), decode_value(v))).collect())
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => serde_json::json!({ "nullValue": null }),
        Value::Bool(b) => serde_json::json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::json!({ "integerValue": i.to_string() })
            } else {
                serde_json::json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        Value::String(s) => serde_json::json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            serde_json::json!({ "arrayValue": { "values": values } })
        }
        Value::Object(_) => serde_json::json!({ "mapValue": { "fields": encode_fields(value) } }),
    }
}

fn decode_value(value: &Value) -> Value {
    let Some((tag, inner)) = value.as_object().and_then(|m| m.iter().next()) else {
        return Value::Null;
    };
    match tag.as_str() {
        "integerValue" => match inner {
            Value::String(s) => s.parse::<i64>().map_or(Value::Null, Value::from),
            other => other.clone(),
        },
        "arrayValue" => {
            let values = inner.get("values").and_then(Value::as_array);
            Value::Array(values.map(|v| v.iter().map(decode_value).collect()).unwrap_or_default())
        }
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields),
            None => Value::Object(Map::new()),
        },
        // stringValue, booleanValue, doubleValue, nullValue, timestampValue,
        // referenceValue, bytesValue, geoPointValue
        _ => inner.clone(),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn document_url(project_id: &str, api_key: &str, collection: &str, id: &str) -> String {
    format!(
        "https://firestore.googleapis.com/v1/projects/{project_id}/databases/(default)/documents/{collection}/{id}?key={api_key}"
    )
}

/// Firestore accessed over its REST API with the web API key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirestoreRest {
    project_id: String,
    api_key: String,
}

impl FirestoreRest {
    pub fn new(config: &FirebaseConfig) -> Self {
        Self { project_id: config.project_id.clone(), api_key: config.api_key.clone() }
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreRest {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let url = document_url(&self.project_id, &self.api_key, collection, id);
            let resp = gloo_net::http::Request::get(&url)
                .send()
                .await
                .map_err(|e| StoreError::Request(e.to_string()))?;
            if resp.status() == 404 {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(StoreError::Status(resp.status()));
            }
            let doc: FirestoreDocument = resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;
            Ok(Some(decode_fields(&doc.fields)))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.project_id, &self.api_key, collection, id);
            Err(StoreError::Unavailable)
        }
    }

    async fn set_document(&self, collection: &str, id: &str, data: &Value) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let url = document_url(&self.project_id, &self.api_key, collection, id);
            let body = FirestoreDocument { name: None, fields: encode_fields(data) };
            let resp = gloo_net::http::Request::patch(&url)
                .json(&body)
                .map_err(|e| StoreError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| StoreError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(StoreError::Status(resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (collection, id, data);
            Err(StoreError::Unavailable)
        }
    }
}
