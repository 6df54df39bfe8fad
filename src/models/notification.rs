use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::NotificationKind;

/// A per-patient notification stored under `notification_<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub date: NaiveDate,
    pub read: bool,
    pub urgent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new notification; `read` always starts false.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub patient_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub date: NaiveDate,
    pub urgent: bool,
}
