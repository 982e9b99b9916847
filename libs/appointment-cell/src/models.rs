// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::{AppError, AppointmentStatus, NewAppointment};
use shared_utils::validation::{
    deserialize_optional_id, optional_text, parse_date_time, required, required_text,
};

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Body of `POST /appointments` and `PUT /appointments/{id}`.
///
/// Ids may arrive as numbers or as the strings a `<select>` produces. Extra
/// fields (the joined names the list view echoes back on edit) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub patient_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub doctor_id: Option<i32>,
    pub appointment_date: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
}

impl AppointmentRequest {
    /// New appointments start out `scheduled` unless told otherwise.
    pub fn validate_for_create(self) -> Result<NewAppointment, AppError> {
        self.validate(Some(AppointmentStatus::Scheduled))
    }

    /// A full update replaces every field, status included.
    pub fn validate_for_update(self) -> Result<NewAppointment, AppError> {
        self.validate(None)
    }

    fn validate(self, default_status: Option<AppointmentStatus>) -> Result<NewAppointment, AppError> {
        let patient_id = required("patient_id", self.patient_id)?;
        let doctor_id = required("doctor_id", self.doctor_id)?;
        let appointment_date = required_text("appointment_date", self.appointment_date)?;
        let appointment_date = parse_date_time("appointment_date", &appointment_date)?;

        let status = match optional_text(self.status) {
            Some(raw) => parse_status(&raw)?,
            None => required("status", default_status)?,
        };

        Ok(NewAppointment {
            patient_id,
            doctor_id,
            appointment_date,
            reason: optional_text(self.reason),
            status,
        })
    }
}

/// Body of `PUT /appointments/{id}/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    pub fn validate(self) -> Result<AppointmentStatus, AppError> {
        let raw = optional_text(self.status)
            .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;
        parse_status(&raw)
    }
}

pub fn parse_status(raw: &str) -> Result<AppointmentStatus, AppError> {
    raw.parse::<AppointmentStatus>().map_err(|_| {
        let allowed: Vec<&str> = AppointmentStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::ValidationError(format!(
            "Invalid status '{}'. Expected one of: {}",
            raw,
            allowed.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request() -> AppointmentRequest {
        serde_json::from_value(serde_json::json!({
            "patient_id": "1",
            "doctor_id": 2,
            "appointment_date": "2024-01-01T10:00:00Z",
            "reason": "checkup",
            "patient_first_name": "ignored"
        }))
        .unwrap()
    }

    #[test]
    fn create_defaults_to_scheduled() {
        let appointment = request().validate_for_create().unwrap();
        assert_eq!(appointment.patient_id, 1);
        assert_eq!(appointment.doctor_id, 2);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn update_requires_status() {
        assert_matches!(
            request().validate_for_update(),
            Err(AppError::ValidationError(msg)) if msg == "status is required"
        );
        let with_status = AppointmentRequest { status: Some("completed".into()), ..request() };
        assert_eq!(with_status.validate_for_update().unwrap().status, AppointmentStatus::Completed);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let bad = AppointmentRequest { status: Some("admitted".into()), ..request() };
        assert_matches!(
            bad.validate_for_create(),
            Err(AppError::ValidationError(msg)) if msg.starts_with("Invalid status 'admitted'")
        );
    }

    #[test]
    fn status_update_requires_a_value() {
        assert_matches!(
            StatusUpdateRequest { status: None }.validate(),
            Err(AppError::BadRequest(msg)) if msg == "Status is required"
        );
        assert_eq!(
            StatusUpdateRequest { status: Some("no-show".into()) }.validate().unwrap(),
            AppointmentStatus::NoShow
        );
    }
}
