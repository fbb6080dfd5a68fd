//! Conversions between stored BSON documents and the JSON the API speaks.
//!
//! Ids leave the store as 24-char hex strings, the way API clients expect
//! them. Every other BSON value uses relaxed extended JSON.

use mongodb::bson::{self, Bson, Document, oid::ObjectId};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use cardoctor_core::AppError;

/// Parse a path id into an [`ObjectId`].
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// Render a BSON value as API JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => Value::Object(document_to_map(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_map(doc: Document) -> Map<String, Value> {
    doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect()
}

/// Decode a stored document into a model type.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(document_to_map(doc)))?)
}

/// Encode a client-supplied JSON object for storage.
pub fn map_to_document(fields: &Map<String, Value>) -> Result<Document, AppError> {
    bson::to_document(fields).map_err(|e| AppError::DocumentError(e.to_string()))
}

/// Render a store-assigned id.
pub fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
