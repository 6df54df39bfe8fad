use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::Account;

/// Medical/contact attributes stored under `patient_<id>`.
///
/// `id` equals the owning account's id; `user_id` restates the link so the
/// stored document is self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: String,
    pub user_id: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    pub medical_history: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account + profile merged into one view. Only produced when both records
/// exist under the same identifier. The password is not re-surfaced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    pub medical_history: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientRecord {
    pub(crate) fn join(account: &Account, profile: &PatientProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            age: profile.age,
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            medical_history: profile.medical_history.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at.max(account.updated_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    pub medical_history: String,
}

/// Partial update spanning both underlying records: `name`/`email` land on the
/// account, the rest on the profile. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl PatientUpdate {
    pub(crate) fn account_fields(&self) -> AccountPart<'_> {
        AccountPart {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
        }
    }

    pub(crate) fn profile_fields(&self) -> ProfilePart<'_> {
        ProfilePart {
            age: self.age,
            phone: self.phone.as_deref(),
            address: self.address.as_deref(),
            medical_history: self.medical_history.as_deref(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct AccountPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct ProfilePart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<&'a str>,
}
