use serde::{Deserialize, Serialize};

use shared_models::{AppError, NewDoctor};
use shared_utils::validation::{optional_email, optional_phone, required_text};

/// Doctor form body for create and full update. Every field is optional at
/// the wire level so a missing one produces a field-specific 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
}

impl DoctorRequest {
    pub fn validate(self) -> Result<NewDoctor, AppError> {
        Ok(NewDoctor {
            first_name: required_text("first_name", self.first_name)?,
            last_name: required_text("last_name", self.last_name)?,
            specialization: required_text("specialization", self.specialization)?,
            email: optional_email(self.email)?,
            phone: optional_phone(self.phone)?,
            license_number: required_text("license_number", self.license_number)?,
        })
    }
}
