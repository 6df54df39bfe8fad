use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::Account;

/// Professional attributes stored under `doctor_<id>`, linked 1:1 to an
/// account via identifier equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: String,
    pub user_id: String,
    pub phone: String,
    pub specialization: String,
    pub qualification: String,
    pub experience: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account + profile merged into one view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub qualification: String,
    pub experience: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DoctorRecord {
    pub(crate) fn join(account: &Account, profile: &DoctorProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            phone: profile.phone.clone(),
            specialization: profile.specialization.clone(),
            qualification: profile.qualification.clone(),
            experience: profile.experience,
            created_at: profile.created_at,
            updated_at: profile.updated_at.max(account.updated_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub specialization: String,
    pub qualification: String,
    pub experience: u32,
}

/// Partial update — `name`/`email` land on the account, the rest on the
/// profile. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
}

impl DoctorUpdate {
    pub(crate) fn account_fields(&self) -> super::patient::AccountPart<'_> {
        super::patient::AccountPart {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
        }
    }

    pub(crate) fn profile_fields(&self) -> DoctorProfilePart<'_> {
        DoctorProfilePart {
            phone: self.phone.as_deref(),
            specialization: self.specialization.as_deref(),
            qualification: self.qualification.as_deref(),
            experience: self.experience,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct DoctorProfilePart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
}
