use std::sync::Arc;

use tracing::{debug, info};

use shared_database::HospitalStore;
use shared_models::{AppError, Patient};
use shared_utils::AppState;

use crate::models::PatientRequest;

pub struct PatientService {
    store: Arc<dyn HospitalStore>,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store(),
        }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        debug!("Listing patients");
        Ok(self.store.list_patients().await?)
    }

    pub async fn get_patient(&self, patient_id: i32) -> Result<Patient, AppError> {
        debug!("Fetching patient: {}", patient_id);
        Ok(self.store.get_patient(patient_id).await?)
    }

    pub async fn create_patient(&self, request: PatientRequest) -> Result<Patient, AppError> {
        let patient = request.validate()?;
        debug!("Creating patient: {} {}", patient.first_name, patient.last_name);

        let created = self.store.create_patient(&patient).await?;
        info!("Patient {} created with ID: {}", created.full_name(), created.id);
        Ok(created)
    }

    pub async fn update_patient(
        &self,
        patient_id: i32,
        request: PatientRequest,
    ) -> Result<Patient, AppError> {
        let patient = request.validate()?;
        debug!("Updating patient: {}", patient_id);

        Ok(self.store.update_patient(patient_id, &patient).await?)
    }

    pub async fn delete_patient(&self, patient_id: i32) -> Result<(), AppError> {
        debug!("Deleting patient: {}", patient_id);

        self.store.delete_patient(patient_id).await?;
        info!("Patient {} deleted", patient_id);
        Ok(())
    }
}
