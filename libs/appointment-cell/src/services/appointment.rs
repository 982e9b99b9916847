use std::sync::Arc;

use tracing::{debug, info};

use shared_database::HospitalStore;
use shared_models::{AppError, Appointment, AppointmentDetails};
use shared_utils::AppState;

use crate::models::{AppointmentRequest, StatusUpdateRequest};

pub struct AppointmentService {
    store: Arc<dyn HospitalStore>,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store(),
        }
    }

    /// All appointments with patient and doctor names, newest first.
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentDetails>, AppError> {
        debug!("Listing appointments");
        Ok(self.store.list_appointments().await?)
    }

    pub async fn get_appointment(&self, appointment_id: i32) -> Result<AppointmentDetails, AppError> {
        debug!("Fetching appointment: {}", appointment_id);
        Ok(self.store.get_appointment(appointment_id).await?)
    }

    /// Book an appointment. Patient and doctor must already exist.
    pub async fn create_appointment(
        &self,
        request: AppointmentRequest,
    ) -> Result<Appointment, AppError> {
        let appointment = request.validate_for_create()?;
        debug!(
            "Booking appointment for patient {} with doctor {} at {}",
            appointment.patient_id, appointment.doctor_id, appointment.appointment_date
        );

        let created = self.store.create_appointment(&appointment).await?;
        info!("Appointment created with ID: {}", created.id);
        Ok(created)
    }

    pub async fn update_appointment(
        &self,
        appointment_id: i32,
        request: AppointmentRequest,
    ) -> Result<Appointment, AppError> {
        let appointment = request.validate_for_update()?;
        debug!("Updating appointment: {}", appointment_id);

        Ok(self.store.update_appointment(appointment_id, &appointment).await?)
    }

    /// Change only the status column; every other field is left as stored.
    pub async fn update_status(
        &self,
        appointment_id: i32,
        request: StatusUpdateRequest,
    ) -> Result<Appointment, AppError> {
        let status = request.validate()?;
        debug!("Setting appointment {} status to {}", appointment_id, status);

        Ok(self.store.update_appointment_status(appointment_id, status).await?)
    }

    pub async fn delete_appointment(&self, appointment_id: i32) -> Result<(), AppError> {
        debug!("Deleting appointment: {}", appointment_id);

        self.store.delete_appointment(appointment_id).await?;
        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }
}
