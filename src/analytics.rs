//! Derived summary statistics over sessions and progress entries.
//!
//! Every call re-scans both prefixes from scratch; there is no incremental
//! state to drift. Fine at clinic volumes, explicitly not built for scale.

use serde::{Deserialize, Serialize};

use crate::models::{ProgressEntry, SessionStatus, TherapySession};
use crate::store::{Entity, KvStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapySummary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub scheduled_sessions: usize,
    /// Means of the three progress scores, rounded to one decimal;
    /// 0.0 when no entries exist.
    pub avg_symptom_score: f64,
    pub avg_energy_level: f64,
    pub avg_sleep_quality: f64,
}

/// Scan sessions and progress entries (the two reads batched concurrently)
/// and reduce them to counts and score means. Documents under a prefix that
/// fail to decode are skipped rather than failing the whole summary.
pub async fn compute_summary(store: &impl KvStore) -> Result<TherapySummary, StoreError> {
    let (session_docs, progress_docs) = tokio::join!(
        store.scan_by_prefix(Entity::TherapySession.prefix()),
        store.scan_by_prefix(Entity::ProgressEntry.prefix()),
    );

    let sessions: Vec<TherapySession> = session_docs?
        .into_iter()
        .filter_map(|doc| serde_json::from_value(doc).ok())
        .collect();
    let entries: Vec<ProgressEntry> = progress_docs?
        .into_iter()
        .filter_map(|doc| serde_json::from_value(doc).ok())
        .collect();

    let completed = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .count();
    let scheduled = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Scheduled)
        .count();

    // max(count, 1) so an empty journal yields 0.0 instead of dividing by zero
    let divisor = entries.len().max(1) as f64;
    let mean = |sum: u64| round1(sum as f64 / divisor);

    Ok(TherapySummary {
        total_sessions: sessions.len(),
        completed_sessions: completed,
        scheduled_sessions: scheduled,
        avg_symptom_score: mean(entries.iter().map(|e| e.symptom_score as u64).sum()),
        avg_energy_level: mean(entries.iter().map(|e| e.energy_level as u64).sum()),
        avg_sleep_quality: mean(entries.iter().map(|e| e.sleep_quality as u64).sum()),
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::{NewProgressEntry, NewSession};
    use crate::repository::{create_progress_entry, create_session, update_session_status};
    use crate::store::SqliteStore;

    use super::*;

    fn session(day: u32) -> NewSession {
        NewSession {
            patient_id: "p1".into(),
            doctor_id: "d1".into(),
            therapy_type: "Basti".into(),
            date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
            time: "09:00".into(),
            duration: 45,
            practitioner: "R. Nair".into(),
            notes: "".into(),
            pre_procedure_instructions: vec![],
            post_procedure_instructions: vec![],
        }
    }

    fn entry(symptom: u8, energy: u8, sleep: u8) -> NewProgressEntry {
        NewProgressEntry {
            patient_id: "p1".into(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            symptom_score: symptom,
            energy_level: energy,
            sleep_quality: sleep,
            notes: "".into(),
            feedback: "".into(),
        }
    }

    #[tokio::test]
    async fn empty_store_yields_zeroes() {
        let store = SqliteStore::open_in_memory().unwrap();
        let summary = compute_summary(&store).await.unwrap();
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.avg_symptom_score, 0.0);
        assert_eq!(summary.avg_energy_level, 0.0);
        assert_eq!(summary.avg_sleep_quality, 0.0);
    }

    #[tokio::test]
    async fn counts_sessions_by_status() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = create_session(&store, session(1)).await.unwrap();
        create_session(&store, session(2)).await.unwrap();
        update_session_status(&store, &first.id, SessionStatus::Completed)
            .await
            .unwrap();

        let summary = compute_summary(&store).await.unwrap();
        assert_eq!(summary.total_sessions, 2);
        assert_eq!(summary.completed_sessions, 1);
        assert_eq!(summary.scheduled_sessions, 1);
    }

    #[tokio::test]
    async fn means_round_to_one_decimal() {
        let store = SqliteStore::open_in_memory().unwrap();
        create_progress_entry(&store, entry(7, 4, 6)).await.unwrap();
        create_progress_entry(&store, entry(8, 5, 6)).await.unwrap();
        create_progress_entry(&store, entry(8, 5, 7)).await.unwrap();

        let summary = compute_summary(&store).await.unwrap();
        // 23/3 = 7.666... -> 7.7, 14/3 = 4.666... -> 4.7, 19/3 = 6.333... -> 6.3
        assert_eq!(summary.avg_symptom_score, 7.7);
        assert_eq!(summary.avg_energy_level, 4.7);
        assert_eq!(summary.avg_sleep_quality, 6.3);
    }

    #[tokio::test]
    async fn undecodable_documents_are_skipped() {
        let store = SqliteStore::open_in_memory().unwrap();
        create_session(&store, session(1)).await.unwrap();
        store
            .set(
                &Entity::TherapySession.key("broken"),
                serde_json::json!({"id": "broken"}),
            )
            .await
            .unwrap();

        let summary = compute_summary(&store).await.unwrap();
        assert_eq!(summary.total_sessions, 1);
    }
}
