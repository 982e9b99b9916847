use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_date: DateTime<Utc>,
    pub reason: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_emergency(&self) -> bool {
        self.reason
            .as_deref()
            .map(|reason| reason.to_lowercase().contains("emergency"))
            .unwrap_or(false)
    }
}

/// Appointment joined with the names of its patient and doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AppointmentDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub appointment: Appointment,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub doctor_first_name: String,
    pub doctor_last_name: String,
    pub specialization: String,
}

/// Validated appointment fields, used for both insert and full-row update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_date: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown appointment status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment_with_reason(reason: Option<&str>) -> Appointment {
        Appointment {
            id: 1,
            patient_id: 1,
            doctor_id: 1,
            appointment_date: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            reason: reason.map(str::to_string),
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_parses_canonical_values() {
        assert_eq!("no-show".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::NoShow);
        assert_eq!(" Confirmed ".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Confirmed);
        assert_eq!(
            "admitted".parse::<AppointmentStatus>(),
            Err(UnknownStatus("admitted".to_string()))
        );
    }

    #[test]
    fn status_serializes_in_kebab_case() {
        assert_eq!(serde_json::to_string(&AppointmentStatus::NoShow).unwrap(), "\"no-show\"");
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn emergency_match_ignores_case() {
        assert!(appointment_with_reason(Some("EMERGENCY visit")).is_emergency());
        assert!(appointment_with_reason(Some("post-emergency follow up")).is_emergency());
        assert!(!appointment_with_reason(Some("checkup")).is_emergency());
        assert!(!appointment_with_reason(None).is_emergency());
    }

    #[test]
    fn details_flatten_appointment_fields() {
        let details = AppointmentDetails {
            appointment: appointment_with_reason(Some("checkup")),
            patient_first_name: "John".into(),
            patient_last_name: "Smith".into(),
            doctor_first_name: "Jane".into(),
            doctor_last_name: "Doe".into(),
            specialization: "Cardiology".into(),
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["doctor_last_name"], "Doe");
        assert!(json.get("appointment").is_none());
    }
}
