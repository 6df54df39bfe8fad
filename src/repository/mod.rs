//! Domain services — entity-scoped operations over the store primitives.
//!
//! One sub-module per entity kind. Every public function takes the store
//! handle explicitly; there is no ambient client. Joins, filters, and
//! ordering all happen in application memory after prefix scans, O(n) in
//! the records under a prefix. Table sizes stay small per deployment.

mod account;
mod doctor;
mod notification;
mod orphan;
mod patient;
mod progress;
mod reference;
mod session;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{Entity, KvStore, StoreError};

pub use account::*;
pub use doctor::*;
pub use notification::*;
pub use orphan::*;
pub use patient::*;
pub use progress::*;
pub use reference::*;
pub use session::*;

/// Field-level merge: every field present in `patch` overwrites the matching
/// field in `doc`; fields absent from `patch` keep their stored value.
pub(crate) fn merge_document(doc: &mut Value, patch: &Value) {
    if let (Some(doc_map), Some(patch_map)) = (doc.as_object_mut(), patch.as_object()) {
        for (field, value) in patch_map {
            doc_map.insert(field.clone(), value.clone());
        }
    }
}

/// Stamp a fresh `updated_at` on the document. `created_at` is never touched
/// after the initial write.
pub(crate) fn touch(doc: &mut Value, now: &Value) {
    if let Some(map) = doc.as_object_mut() {
        map.insert("updated_at".to_string(), now.clone());
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(value)?)
}

pub(crate) fn decode_all<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, StoreError> {
    values.into_iter().map(decode).collect()
}

/// Read-merge-write update of a single record: fetch the document, overlay
/// the patch fields, refresh `updated_at`, write the whole value back.
/// Fails with `NotFound` when the record is missing. No version check —
/// concurrent updates race last-write-wins.
pub(crate) async fn merge_update<T: DeserializeOwned>(
    store: &impl KvStore,
    entity: Entity,
    id: &str,
    patch: &impl Serialize,
) -> Result<T, StoreError> {
    let key = entity.key(id);
    let mut doc = store
        .get(&key)
        .await?
        .ok_or_else(|| StoreError::not_found(entity, id))?;
    merge_document(&mut doc, &serde_json::to_value(patch)?);
    touch(&mut doc, &serde_json::to_value(Utc::now())?);
    store.set(&key, doc.clone()).await?;
    decode(doc)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut doc = json!({"age": 45, "phone": "x", "address": "somewhere"});
        merge_document(&mut doc, &json!({"phone": "y"}));
        assert_eq!(doc, json!({"age": 45, "phone": "y", "address": "somewhere"}));
    }

    #[test]
    fn merge_can_introduce_new_fields() {
        let mut doc = json!({"id": "a"});
        merge_document(&mut doc, &json!({"notes": "n"}));
        assert_eq!(doc["notes"], "n");
    }

    #[test]
    fn merge_ignores_non_object_patch() {
        let mut doc = json!({"id": "a"});
        merge_document(&mut doc, &json!("not an object"));
        assert_eq!(doc, json!({"id": "a"}));
    }

    #[test]
    fn touch_replaces_updated_at_only() {
        let mut doc = json!({"created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"});
        touch(&mut doc, &json!("2026-02-01T00:00:00Z"));
        assert_eq!(doc["created_at"], "2026-01-01T00:00:00Z");
        assert_eq!(doc["updated_at"], "2026-02-01T00:00:00Z");
    }
}
