use chrono::Utc;
use serde_json::json;

use crate::models::{NewNotification, Notification};
use crate::store::{new_record_id, Entity, KvStore, StoreError};

use super::{decode_all, merge_update};

pub async fn create_notification(
    store: &impl KvStore,
    input: NewNotification,
) -> Result<Notification, StoreError> {
    let now = Utc::now();
    let notification = Notification {
        id: new_record_id(),
        patient_id: input.patient_id,
        kind: input.kind,
        title: input.title,
        message: input.message,
        date: input.date,
        read: false,
        urgent: input.urgent,
        created_at: now,
        updated_at: now,
    };
    store
        .set(
            &Entity::Notification.key(&notification.id),
            serde_json::to_value(&notification)?,
        )
        .await?;
    Ok(notification)
}

/// Full-prefix scan filtered in memory on `patient_id`; urgent ones first,
/// then newest first.
pub async fn list_notifications_for_patient(
    store: &impl KvStore,
    patient_id: &str,
) -> Result<Vec<Notification>, StoreError> {
    let mut notifications: Vec<Notification> =
        decode_all(store.scan_by_prefix(Entity::Notification.prefix()).await?)?
            .into_iter()
            .filter(|n: &Notification| n.patient_id == patient_id)
            .collect();
    notifications.sort_by(|a, b| b.urgent.cmp(&a.urgent).then_with(|| b.date.cmp(&a.date)));
    Ok(notifications)
}

pub async fn mark_notification_read(
    store: &impl KvStore,
    id: &str,
) -> Result<Notification, StoreError> {
    merge_update(store, Entity::Notification, id, &json!({ "read": true })).await
}

pub async fn unread_count(store: &impl KvStore, patient_id: &str) -> Result<usize, StoreError> {
    let notifications = list_notifications_for_patient(store, patient_id).await?;
    Ok(notifications.iter().filter(|n| !n.read).count())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::NotificationKind;
    use crate::store::SqliteStore;

    use super::*;

    fn notification(patient_id: &str, day: u32, urgent: bool) -> NewNotification {
        NewNotification {
            patient_id: patient_id.into(),
            kind: NotificationKind::Reminder,
            title: "Session tomorrow".into(),
            message: "Abhyanga at 10:00".into(),
            date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            urgent,
        }
    }

    #[tokio::test]
    async fn list_orders_urgent_first_then_newest() {
        let store = SqliteStore::open_in_memory().unwrap();
        create_notification(&store, notification("p1", 2, false)).await.unwrap();
        create_notification(&store, notification("p1", 5, false)).await.unwrap();
        create_notification(&store, notification("p1", 1, true)).await.unwrap();
        create_notification(&store, notification("p2", 9, true)).await.unwrap();

        let list = list_notifications_for_patient(&store, "p1").await.unwrap();
        assert_eq!(list.len(), 3);
        assert!(list[0].urgent);
        assert_eq!(list[1].date, NaiveDate::from_ymd_opt(2026, 5, 5).unwrap());
        assert_eq!(list[2].date, NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
    }

    #[tokio::test]
    async fn mark_read_and_unread_count() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = create_notification(&store, notification("p1", 1, false)).await.unwrap();
        create_notification(&store, notification("p1", 2, false)).await.unwrap();
        assert_eq!(unread_count(&store, "p1").await.unwrap(), 2);

        let marked = mark_notification_read(&store, &first.id).await.unwrap();
        assert!(marked.read);
        // the rest of the document survives the merge
        assert_eq!(marked.title, "Session tomorrow");
        assert_eq!(unread_count(&store, "p1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mark_read_missing_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = mark_notification_read(&store, "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
