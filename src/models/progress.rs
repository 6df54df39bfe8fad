use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lowest and highest allowed value for the three self-reported scores.
pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 10;

/// A patient's daily self-report stored under `progress_<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub symptom_score: u8,
    pub energy_level: u8,
    pub sleep_quality: u8,
    pub notes: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProgressEntry {
    pub patient_id: String,
    pub date: NaiveDate,
    pub symptom_score: u8,
    pub energy_level: u8,
    pub sleep_quality: u8,
    pub notes: String,
    pub feedback: String,
}

impl NewProgressEntry {
    /// The three scores that must sit inside [SCORE_MIN, SCORE_MAX].
    pub(crate) fn scores(&self) -> [(&'static str, u8); 3] {
        [
            ("symptom_score", self.symptom_score),
            ("energy_level", self.energy_level),
            ("sleep_quality", self.sleep_quality),
        ]
    }
}
