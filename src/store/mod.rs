//! Record store boundary
//!
//! The marketplace persists into a remote tabular service: two tables
//! (`Products`, `Orders`) of records, each record an opaque id plus a map of
//! named fields. Services depend only on the [`RecordStore`] trait, which is
//! the narrow contract any backend has to satisfy: single-record
//! find/list/create/update/destroy with optional field-equality filtering.
//! There is no multi-record transaction.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(any(test, feature = "mock-store"))]
pub use memory::MemoryStore;
pub use rest::RestStore;

/// Named fields of one record, as stored.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A record as the store returns it: generated id plus raw fields.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: String,
    pub fields: Fields,
}

/// A decoded record: `{ id, ...fields }` on the wire.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(flatten)]
    pub fields: T,
}

/// Field-equality filter: "all records where field F equals value V".
#[derive(Debug, Clone)]
pub struct FieldEq {
    pub field: &'static str,
    pub value: String,
}

impl FieldEq {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected request (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed record: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Storage contract for one tabular backend.
///
/// All operations are atomic at the single-record level. `update` merges the
/// given fields into the existing record and returns the merged result.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find(&self, table: &str, id: &str) -> Result<RawRecord, StoreError>;

    async fn list(&self, table: &str, filter: Option<&FieldEq>)
    -> Result<Vec<RawRecord>, StoreError>;

    async fn create(&self, table: &str, fields: Fields) -> Result<RawRecord, StoreError>;

    async fn update(&self, table: &str, id: &str, fields: Fields)
    -> Result<RawRecord, StoreError>;

    async fn destroy(&self, table: &str, id: &str) -> Result<(), StoreError>;
}

/// Serialize a typed field struct into the store's field map.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(StoreError::Codec(serde::ser::Error::custom(format!(
            "expected an object of fields, got {other}"
        )))),
    }
}

/// Decode a raw record into a typed one.
pub fn decode_record<T: DeserializeOwned>(raw: RawRecord) -> Result<Record<T>, StoreError> {
    let fields = serde_json::from_value(serde_json::Value::Object(raw.fields))?;
    Ok(Record { id: raw.id, fields })
}
