use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::SessionStatus;

/// A scheduled therapy session stored under `therapy_session_<id>`.
/// References a patient and a doctor by identifier (many-to-one to each).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub therapy_type: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: u32,
    pub status: SessionStatus,
    pub practitioner: String,
    pub notes: String,
    pub pre_procedure_instructions: Vec<String>,
    pub post_procedure_instructions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for scheduling a session; status always starts as `scheduled`.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub patient_id: String,
    pub doctor_id: String,
    pub therapy_type: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: u32,
    pub practitioner: String,
    pub notes: String,
    pub pre_procedure_instructions: Vec<String>,
    pub post_procedure_instructions: Vec<String>,
}

/// Partial update — `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practitioner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_procedure_instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_procedure_instructions: Option<Vec<String>>,
}
