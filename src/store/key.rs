//! Typed entity→prefix mapping. Keys are `<prefix><identifier>`; building
//! them through [`Entity`] keeps the convention a compile-time fact instead
//! of a string scattered across call sites.

/// Entity kinds with identifier-scoped keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Account,
    PatientProfile,
    DoctorProfile,
    TherapySession,
    ProgressEntry,
    Notification,
}

impl Entity {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Account => "user_",
            Self::PatientProfile => "patient_",
            Self::DoctorProfile => "doctor_",
            Self::TherapySession => "therapy_session_",
            Self::ProgressEntry => "progress_",
            Self::Notification => "notification_",
        }
    }

    /// Full store key for one record of this entity.
    pub fn key(self, id: &str) -> String {
        format!("{}{}", self.prefix(), id)
    }

    /// Name used in error messages and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::PatientProfile => "patient_profile",
            Self::DoctorProfile => "doctor_profile",
            Self::TherapySession => "therapy_session",
            Self::ProgressEntry => "progress_entry",
            Self::Notification => "notification",
        }
    }
}

/// Singleton key holding the static therapy catalogue.
pub const THERAPY_TYPES_KEY: &str = "therapy_types";

/// Singleton key holding the practitioner name list.
pub const PRACTITIONERS_KEY: &str = "practitioners";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_concatenates_prefix_and_id() {
        assert_eq!(Entity::Account.key("abc"), "user_abc");
        assert_eq!(Entity::TherapySession.key("42"), "therapy_session_42");
    }

    #[test]
    fn prefixes_are_distinct() {
        let all = [
            Entity::Account,
            Entity::PatientProfile,
            Entity::DoctorProfile,
            Entity::TherapySession,
            Entity::ProgressEntry,
            Entity::Notification,
        ];
        for a in all {
            for b in all {
                if a != b {
                    assert_ne!(a.prefix(), b.prefix());
                }
            }
        }
    }
}
