use std::sync::Arc;

use tracing::{debug, info};

use shared_database::HospitalStore;
use shared_models::{AppError, Doctor};
use shared_utils::AppState;

use crate::models::DoctorRequest;

pub struct DoctorService {
    store: Arc<dyn HospitalStore>,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store(),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        debug!("Listing doctors");
        Ok(self.store.list_doctors().await?)
    }

    pub async fn get_doctor(&self, doctor_id: i32) -> Result<Doctor, AppError> {
        debug!("Fetching doctor: {}", doctor_id);
        Ok(self.store.get_doctor(doctor_id).await?)
    }

    /// Create a new doctor. The license number must not already be registered.
    pub async fn create_doctor(&self, request: DoctorRequest) -> Result<Doctor, AppError> {
        let doctor = request.validate()?;
        debug!("Creating doctor with license: {}", doctor.license_number);

        let created = self.store.create_doctor(&doctor).await?;
        info!("Doctor {} created with ID: {}", created.full_name(), created.id);
        Ok(created)
    }

    /// Replace every editable field of an existing doctor.
    pub async fn update_doctor(
        &self,
        doctor_id: i32,
        request: DoctorRequest,
    ) -> Result<Doctor, AppError> {
        let doctor = request.validate()?;
        debug!("Updating doctor: {}", doctor_id);

        Ok(self.store.update_doctor(doctor_id, &doctor).await?)
    }

    /// Delete a doctor; refused while any appointment references them.
    pub async fn delete_doctor(&self, doctor_id: i32) -> Result<(), AppError> {
        debug!("Deleting doctor: {}", doctor_id);

        self.store.delete_doctor(doctor_id).await?;
        info!("Doctor {} deleted", doctor_id);
        Ok(())
    }
}
