//! Store primitives — `get` / `set` / `delete` / `scan_by_prefix` over a flat
//! string-keyed document table.
//!
//! Every higher layer is written against the [`KvStore`] trait only, so the
//! system ports to any string-keyed store. Two backends ship here: a remote
//! PostgREST-style client ([`rest::RestStore`]) and a local SQLite table
//! ([`sqlite::SqliteStore`], also the in-memory test store).

pub mod id;
pub mod key;
pub mod probe;
pub mod rest;
pub mod sqlite;

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

pub use id::new_record_id;
pub use key::{Entity, PRACTITIONERS_KEY, THERAPY_TYPES_KEY};
pub use probe::{test_connection, StoreStatus};
pub use rest::RestStore;
pub use sqlite::SqliteStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The remote store could not be reached at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store answered, but rejected the request.
    #[error("Store rejected request with status {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    /// A multi-record write where the first write landed and a later one
    /// failed. No automatic compensation; the orphan path picks this up.
    #[error("Partial write: {entity_type} with id {id} was not written: {source}")]
    PartialWrite {
        entity_type: String,
        id: String,
        #[source]
        source: Box<StoreError>,
    },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

impl StoreError {
    pub(crate) fn not_found(entity: Entity, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity.as_str().to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn partial_write(entity: Entity, id: &str, source: StoreError) -> Self {
        Self::PartialWrite {
            entity_type: entity.as_str().to_string(),
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}

/// Asynchronous primitives over the two-column record table.
///
/// `get` distinguishes absence (`Ok(None)`) from failure (`Err`); `set` is a
/// last-write-wins upsert keyed on exact key equality; `scan_by_prefix`
/// returns values only, in whatever order the backend yields them, and an
/// empty vec when nothing matches. `delete` exists solely for the orphan
/// cleanup path — records are otherwise never physically removed.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    fn set(&self, key: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn scan_by_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<Value>, StoreError>> + Send;
}
