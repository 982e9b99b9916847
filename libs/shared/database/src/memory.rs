use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use shared_models::{
    Appointment, AppointmentDetails, AppointmentStatus, Doctor, Entity, NewAppointment,
    NewDoctor, NewPatient, Patient,
};

use crate::store::{HospitalStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    doctors: BTreeMap<i32, Doctor>,
    patients: BTreeMap<i32, Patient>,
    appointments: BTreeMap<i32, Appointment>,
    next_doctor_id: i32,
    next_patient_id: i32,
    next_appointment_id: i32,
}

impl Tables {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }

    fn license_taken(&self, license_number: &str, except: Option<i32>) -> bool {
        self.doctors
            .values()
            .any(|d| d.license_number == license_number && Some(d.id) != except)
    }

    fn check_references(&self, appointment: &NewAppointment) -> StoreResult<()> {
        if !self.patients.contains_key(&appointment.patient_id) {
            return Err(StoreError::MissingReference {
                entity: Entity::Patient,
                id: appointment.patient_id,
            });
        }
        if !self.doctors.contains_key(&appointment.doctor_id) {
            return Err(StoreError::MissingReference {
                entity: Entity::Doctor,
                id: appointment.doctor_id,
            });
        }
        Ok(())
    }

    fn details(&self, appointment: &Appointment) -> Option<AppointmentDetails> {
        let patient = self.patients.get(&appointment.patient_id)?;
        let doctor = self.doctors.get(&appointment.doctor_id)?;
        Some(AppointmentDetails {
            appointment: appointment.clone(),
            patient_first_name: patient.first_name.clone(),
            patient_last_name: patient.last_name.clone(),
            doctor_first_name: doctor.first_name.clone(),
            doctor_last_name: doctor.last_name.clone(),
            specialization: doctor.specialization.clone(),
        })
    }
}

/// In-process store with the same semantics as the PostgreSQL one.
///
/// Used by the test suites and when no `DATABASE_URL` is configured.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HospitalStore for MemoryStore {
    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.values().cloned().collect())
    }

    async fn get_doctor(&self, id: i32) -> StoreResult<Doctor> {
        let tables = self.tables.read().await;
        tables
            .doctors
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: Entity::Doctor, id })
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> StoreResult<Doctor> {
        let mut tables = self.tables.write().await;
        if tables.license_taken(&doctor.license_number, None) {
            return Err(StoreError::DuplicateLicense(doctor.license_number.clone()));
        }

        let id = Tables::next_id(&mut tables.next_doctor_id);
        let created = Doctor {
            id,
            first_name: doctor.first_name.clone(),
            last_name: doctor.last_name.clone(),
            specialization: doctor.specialization.clone(),
            email: doctor.email.clone(),
            phone: doctor.phone.clone(),
            license_number: doctor.license_number.clone(),
            created_at: Utc::now(),
        };
        tables.doctors.insert(id, created.clone());
        Ok(created)
    }

    async fn update_doctor(&self, id: i32, doctor: &NewDoctor) -> StoreResult<Doctor> {
        let mut tables = self.tables.write().await;
        if !tables.doctors.contains_key(&id) {
            return Err(StoreError::NotFound { entity: Entity::Doctor, id });
        }
        if tables.license_taken(&doctor.license_number, Some(id)) {
            return Err(StoreError::DuplicateLicense(doctor.license_number.clone()));
        }

        let existing = tables
            .doctors
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: Entity::Doctor, id })?;
        existing.first_name = doctor.first_name.clone();
        existing.last_name = doctor.last_name.clone();
        existing.specialization = doctor.specialization.clone();
        existing.email = doctor.email.clone();
        existing.phone = doctor.phone.clone();
        existing.license_number = doctor.license_number.clone();
        Ok(existing.clone())
    }

    async fn delete_doctor(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.appointments.values().any(|a| a.doctor_id == id) {
            return Err(StoreError::HasAppointments(Entity::Doctor));
        }
        tables
            .doctors
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: Entity::Doctor, id })
    }

    async fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables.patients.values().cloned().collect())
    }

    async fn get_patient(&self, id: i32) -> StoreResult<Patient> {
        let tables = self.tables.read().await;
        tables
            .patients
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: Entity::Patient, id })
    }

    async fn create_patient(&self, patient: &NewPatient) -> StoreResult<Patient> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_patient_id);
        let created = Patient {
            id,
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            date_of_birth: patient.date_of_birth,
            gender: patient.gender.clone(),
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            address: patient.address.clone(),
            created_at: Utc::now(),
        };
        tables.patients.insert(id, created.clone());
        Ok(created)
    }

    async fn update_patient(&self, id: i32, patient: &NewPatient) -> StoreResult<Patient> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .patients
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: Entity::Patient, id })?;
        existing.first_name = patient.first_name.clone();
        existing.last_name = patient.last_name.clone();
        existing.date_of_birth = patient.date_of_birth;
        existing.gender = patient.gender.clone();
        existing.phone = patient.phone.clone();
        existing.email = patient.email.clone();
        existing.address = patient.address.clone();
        Ok(existing.clone())
    }

    async fn delete_patient(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.appointments.values().any(|a| a.patient_id == id) {
            return Err(StoreError::HasAppointments(Entity::Patient));
        }
        tables
            .patients
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: Entity::Patient, id })
    }

    async fn list_appointments(&self) -> StoreResult<Vec<AppointmentDetails>> {
        let tables = self.tables.read().await;
        let mut appointments: Vec<AppointmentDetails> = tables
            .appointments
            .values()
            .filter_map(|a| tables.details(a))
            .collect();
        appointments.sort_by(|a, b| {
            b.appointment
                .appointment_date
                .cmp(&a.appointment.appointment_date)
                .then(b.appointment.id.cmp(&a.appointment.id))
        });
        Ok(appointments)
    }

    async fn get_appointment(&self, id: i32) -> StoreResult<AppointmentDetails> {
        let tables = self.tables.read().await;
        tables
            .appointments
            .get(&id)
            .and_then(|a| tables.details(a))
            .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })
    }

    async fn create_appointment(&self, appointment: &NewAppointment) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        tables.check_references(appointment)?;

        let id = Tables::next_id(&mut tables.next_appointment_id);
        let created = Appointment {
            id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            appointment_date: appointment.appointment_date,
            reason: appointment.reason.clone(),
            status: appointment.status,
            created_at: Utc::now(),
        };
        tables.appointments.insert(id, created.clone());
        Ok(created)
    }

    async fn update_appointment(
        &self,
        id: i32,
        appointment: &NewAppointment,
    ) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        if !tables.appointments.contains_key(&id) {
            return Err(StoreError::NotFound { entity: Entity::Appointment, id });
        }
        tables.check_references(appointment)?;

        let existing = tables
            .appointments
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })?;
        existing.patient_id = appointment.patient_id;
        existing.doctor_id = appointment.doctor_id;
        existing.appointment_date = appointment.appointment_date;
        existing.reason = appointment.reason.clone();
        existing.status = appointment.status;
        Ok(existing.clone())
    }

    async fn update_appointment_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .appointments
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })?;
        existing.status = status;
        Ok(existing.clone())
    }

    async fn delete_appointment(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .appointments
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })
    }
}
