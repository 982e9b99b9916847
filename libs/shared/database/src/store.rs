use async_trait::async_trait;
use thiserror::Error;
use tracing::error;

use shared_models::{
    Appointment, AppointmentDetails, AppointmentStatus, AppError, Doctor, Entity,
    NewAppointment, NewDoctor, NewPatient, Patient,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("Cannot delete {0} with appointments")]
    HasAppointments(Entity),

    #[error("Doctor with license number {0} already exists")]
    DuplicateLicense(String),

    #[error("{} {id} does not exist", .entity.title())]
    MissingReference { entity: Entity, id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound { entity, .. } => AppError::NotFound(entity.not_found_message()),
            StoreError::HasAppointments(_) | StoreError::DuplicateLicense(_) => {
                AppError::Conflict(err.to_string())
            }
            StoreError::MissingReference { .. } => AppError::ValidationError(err.to_string()),
            StoreError::Database(e) => {
                error!("Store failure: {:?}", e);
                AppError::Database(e.to_string())
            }
        }
    }
}

/// Data access for doctors, patients and appointments.
///
/// Implementations bind every value as a query parameter and enforce the
/// dependency guard: a doctor or patient referenced by an appointment is
/// never deleted.
#[async_trait]
pub trait HospitalStore: Send + Sync {
    /// All doctors, ordered by id.
    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>>;
    async fn get_doctor(&self, id: i32) -> StoreResult<Doctor>;
    async fn create_doctor(&self, doctor: &NewDoctor) -> StoreResult<Doctor>;
    async fn update_doctor(&self, id: i32, doctor: &NewDoctor) -> StoreResult<Doctor>;
    async fn delete_doctor(&self, id: i32) -> StoreResult<()>;

    /// All patients, ordered by id.
    async fn list_patients(&self) -> StoreResult<Vec<Patient>>;
    async fn get_patient(&self, id: i32) -> StoreResult<Patient>;
    async fn create_patient(&self, patient: &NewPatient) -> StoreResult<Patient>;
    async fn update_patient(&self, id: i32, patient: &NewPatient) -> StoreResult<Patient>;
    async fn delete_patient(&self, id: i32) -> StoreResult<()>;

    /// All appointments joined with patient and doctor names, newest date first.
    async fn list_appointments(&self) -> StoreResult<Vec<AppointmentDetails>>;
    async fn get_appointment(&self, id: i32) -> StoreResult<AppointmentDetails>;
    async fn create_appointment(&self, appointment: &NewAppointment) -> StoreResult<Appointment>;
    async fn update_appointment(
        &self,
        id: i32,
        appointment: &NewAppointment,
    ) -> StoreResult<Appointment>;
    /// Touches the status column only.
    async fn update_appointment_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> StoreResult<Appointment>;
    async fn delete_appointment(&self, id: i32) -> StoreResult<()>;
}
