use serde::{Deserialize, Serialize};

use shared_models::{AppError, NewPatient};
use shared_utils::validation::{
    optional_email, optional_phone, optional_text, parse_date, required_text,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl PatientRequest {
    pub fn validate(self) -> Result<NewPatient, AppError> {
        let first_name = required_text("first_name", self.first_name)?;
        let last_name = required_text("last_name", self.last_name)?;
        let date_of_birth = required_text("date_of_birth", self.date_of_birth)?;
        let date_of_birth = parse_date("date_of_birth", &date_of_birth)?;

        Ok(NewPatient {
            first_name,
            last_name,
            date_of_birth,
            gender: required_text("gender", self.gender)?,
            phone: optional_phone(self.phone)?,
            email: optional_email(self.email)?,
            address: optional_text(self.address),
        })
    }
}
