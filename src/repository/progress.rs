use chrono::Utc;

use crate::models::{NewProgressEntry, ProgressEntry, SCORE_MAX, SCORE_MIN};
use crate::store::{new_record_id, Entity, KvStore, StoreError};

use super::decode_all;

pub async fn create_progress_entry(
    store: &impl KvStore,
    input: NewProgressEntry,
) -> Result<ProgressEntry, StoreError> {
    for (field, score) in input.scores() {
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(StoreError::ConstraintViolation(format!(
                "{field} must be between {SCORE_MIN} and {SCORE_MAX}, got {score}"
            )));
        }
    }

    let now = Utc::now();
    let entry = ProgressEntry {
        id: new_record_id(),
        patient_id: input.patient_id,
        date: input.date,
        symptom_score: input.symptom_score,
        energy_level: input.energy_level,
        sleep_quality: input.sleep_quality,
        notes: input.notes,
        feedback: input.feedback,
        created_at: now,
        updated_at: now,
    };
    store
        .set(
            &Entity::ProgressEntry.key(&entry.id),
            serde_json::to_value(&entry)?,
        )
        .await?;
    Ok(entry)
}

/// Full-prefix scan filtered in memory on `patient_id`, newest first.
pub async fn list_progress_for_patient(
    store: &impl KvStore,
    patient_id: &str,
) -> Result<Vec<ProgressEntry>, StoreError> {
    let mut entries: Vec<ProgressEntry> =
        decode_all(store.scan_by_prefix(Entity::ProgressEntry.prefix()).await?)?
            .into_iter()
            .filter(|e: &ProgressEntry| e.patient_id == patient_id)
            .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::store::SqliteStore;

    use super::*;

    fn entry(patient_id: &str, day: u32, symptom: u8) -> NewProgressEntry {
        NewProgressEntry {
            patient_id: patient_id.into(),
            date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
            symptom_score: symptom,
            energy_level: 6,
            sleep_quality: 7,
            notes: "".into(),
            feedback: "".into(),
        }
    }

    #[tokio::test]
    async fn create_and_list_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        create_progress_entry(&store, entry("p1", 1, 4)).await.unwrap();
        create_progress_entry(&store, entry("p1", 3, 3)).await.unwrap();
        create_progress_entry(&store, entry("p2", 2, 5)).await.unwrap();

        let entries = list_progress_for_patient(&store, "p1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2026, 4, 3).unwrap());
        assert!(entries.iter().all(|e| e.patient_id == "p1"));
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = create_progress_entry(&store, entry("p1", 1, 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
        let err = create_progress_entry(&store, entry("p1", 1, 11)).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn boundary_scores_are_accepted() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(create_progress_entry(&store, entry("p1", 1, 1)).await.is_ok());
        assert!(create_progress_entry(&store, entry("p1", 2, 10)).await.is_ok());
    }
}
