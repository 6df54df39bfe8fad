use chrono::Utc;

use crate::models::{NewSession, SessionStatus, SessionUpdate, TherapySession};
use crate::store::{new_record_id, Entity, KvStore, StoreError};

use super::{decode, decode_all, merge_update};

pub async fn create_session(
    store: &impl KvStore,
    input: NewSession,
) -> Result<TherapySession, StoreError> {
    let now = Utc::now();
    let session = TherapySession {
        id: new_record_id(),
        patient_id: input.patient_id,
        doctor_id: input.doctor_id,
        therapy_type: input.therapy_type,
        date: input.date,
        time: input.time,
        duration: input.duration,
        status: SessionStatus::Scheduled,
        practitioner: input.practitioner,
        notes: input.notes,
        pre_procedure_instructions: input.pre_procedure_instructions,
        post_procedure_instructions: input.post_procedure_instructions,
        created_at: now,
        updated_at: now,
    };
    store
        .set(
            &Entity::TherapySession.key(&session.id),
            serde_json::to_value(&session)?,
        )
        .await?;
    tracing::info!(id = %session.id, therapy = %session.therapy_type, "Scheduled session");
    Ok(session)
}

pub async fn get_session(
    store: &impl KvStore,
    id: &str,
) -> Result<Option<TherapySession>, StoreError> {
    match store.get(&Entity::TherapySession.key(id)).await? {
        Some(value) => Ok(Some(decode(value)?)),
        None => Ok(None),
    }
}

/// Full-prefix scan filtered in memory on `patient_id`, newest first.
pub async fn list_sessions_for_patient(
    store: &impl KvStore,
    patient_id: &str,
) -> Result<Vec<TherapySession>, StoreError> {
    let mut sessions: Vec<TherapySession> =
        decode_all(store.scan_by_prefix(Entity::TherapySession.prefix()).await?)?
            .into_iter()
            .filter(|s: &TherapySession| s.patient_id == patient_id)
            .collect();
    sessions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.time.cmp(&a.time)));
    Ok(sessions)
}

pub async fn list_sessions_for_doctor(
    store: &impl KvStore,
    doctor_id: &str,
) -> Result<Vec<TherapySession>, StoreError> {
    let mut sessions: Vec<TherapySession> =
        decode_all(store.scan_by_prefix(Entity::TherapySession.prefix()).await?)?
            .into_iter()
            .filter(|s: &TherapySession| s.doctor_id == doctor_id)
            .collect();
    sessions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.time.cmp(&a.time)));
    Ok(sessions)
}

pub async fn update_session(
    store: &impl KvStore,
    id: &str,
    update: SessionUpdate,
) -> Result<TherapySession, StoreError> {
    merge_update(store, Entity::TherapySession, id, &update).await
}

/// Status-only transition, the common case for the scheduling screens.
pub async fn update_session_status(
    store: &impl KvStore,
    id: &str,
    status: SessionStatus,
) -> Result<TherapySession, StoreError> {
    update_session(
        store,
        id,
        SessionUpdate {
            status: Some(status),
            ..Default::default()
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::store::SqliteStore;

    use super::*;

    fn new_session(patient_id: &str, doctor_id: &str, day: u32) -> NewSession {
        NewSession {
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            therapy_type: "Abhyanga".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            time: "10:00".into(),
            duration: 60,
            practitioner: "R. Nair".into(),
            notes: "".into(),
            pre_procedure_instructions: vec!["Light breakfast only".into()],
            post_procedure_instructions: vec!["Rest for 2 hours".into()],
        }
    }

    #[tokio::test]
    async fn create_starts_scheduled() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = create_session(&store, new_session("p1", "d1", 1)).await.unwrap();
        assert_eq!(session.status, SessionStatus::Scheduled);
        let fetched = get_session(&store, &session.id).await.unwrap().unwrap();
        assert_eq!(fetched.pre_procedure_instructions, vec!["Light breakfast only"]);
    }

    #[tokio::test]
    async fn list_filters_on_patient_id_only() {
        let store = SqliteStore::open_in_memory().unwrap();
        create_session(&store, new_session("p1", "d1", 1)).await.unwrap();
        create_session(&store, new_session("p1", "d2", 2)).await.unwrap();
        create_session(&store, new_session("p2", "d1", 3)).await.unwrap();

        let sessions = list_sessions_for_patient(&store, "p1").await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| s.patient_id == "p1"));
        // newest first
        assert!(sessions[0].date > sessions[1].date);

        let for_doctor = list_sessions_for_doctor(&store, "d1").await.unwrap();
        assert_eq!(for_doctor.len(), 2);
    }

    #[tokio::test]
    async fn status_transition_keeps_other_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = create_session(&store, new_session("p1", "d1", 1)).await.unwrap();
        let updated = update_session_status(&store, &session.id, SessionStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, SessionStatus::Completed);
        assert_eq!(updated.therapy_type, "Abhyanga");
        assert_eq!(updated.duration, 60);
        assert!(updated.updated_at >= session.updated_at);
    }

    #[tokio::test]
    async fn update_missing_session_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = update_session_status(&store, "ghost", SessionStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
