use crate::models::{default_therapy_types, TherapyType};
use crate::store::{KvStore, StoreError, PRACTITIONERS_KEY, THERAPY_TYPES_KEY};

use super::decode;

/// Therapy catalogue; falls back to the built-in Panchakarma list until the
/// singleton key is seeded.
pub async fn get_therapy_types(store: &impl KvStore) -> Result<Vec<TherapyType>, StoreError> {
    match store.get(THERAPY_TYPES_KEY).await? {
        Some(value) => decode(value),
        None => Ok(default_therapy_types()),
    }
}

pub async fn set_therapy_types(
    store: &impl KvStore,
    types: &[TherapyType],
) -> Result<(), StoreError> {
    store
        .set(THERAPY_TYPES_KEY, serde_json::to_value(types)?)
        .await
}

/// Practitioner name list; empty until seeded.
pub async fn get_practitioners(store: &impl KvStore) -> Result<Vec<String>, StoreError> {
    match store.get(PRACTITIONERS_KEY).await? {
        Some(value) => decode(value),
        None => Ok(Vec::new()),
    }
}

pub async fn set_practitioners(store: &impl KvStore, names: &[String]) -> Result<(), StoreError> {
    store
        .set(PRACTITIONERS_KEY, serde_json::to_value(names)?)
        .await
}

#[cfg(test)]
mod tests {
    use crate::store::SqliteStore;

    use super::*;

    #[tokio::test]
    async fn therapy_types_default_until_seeded() {
        let store = SqliteStore::open_in_memory().unwrap();
        let types = get_therapy_types(&store).await.unwrap();
        assert!(types.iter().any(|t| t.name == "Shirodhara"));

        let custom = vec![TherapyType {
            name: "Abhyanga".into(),
            duration: 90,
            description: "Extended oil massage".into(),
        }];
        set_therapy_types(&store, &custom).await.unwrap();
        assert_eq!(get_therapy_types(&store).await.unwrap(), custom);
    }

    #[tokio::test]
    async fn practitioners_empty_until_seeded() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(get_practitioners(&store).await.unwrap().is_empty());

        let names = vec!["R. Nair".to_string(), "K. Pillai".to_string()];
        set_practitioners(&store, &names).await.unwrap();
        assert_eq!(get_practitioners(&store).await.unwrap(), names);
    }
}
