use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Wire form is snake_case, matching the stored documents.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(StoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Admin => "admin",
    Patient => "patient",
    Doctor => "doctor",
});

str_enum!(SessionStatus {
    Scheduled => "scheduled",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(NotificationKind {
    Appointment => "appointment",
    Reminder => "reminder",
    Progress => "progress",
    System => "system",
});

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn session_status_round_trip() {
        for (variant, s) in [
            (SessionStatus::Scheduled, "scheduled"),
            (SessionStatus::InProgress, "in_progress"),
            (SessionStatus::Completed, "completed"),
            (SessionStatus::Cancelled, "cancelled"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(SessionStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"doctor\"").unwrap(),
            Role::Doctor
        );
    }

    #[test]
    fn unknown_value_is_invalid_enum() {
        let err = Role::from_str("nurse").unwrap_err();
        assert!(matches!(err, StoreError::InvalidEnum { .. }));
    }
}
