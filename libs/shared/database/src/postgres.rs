use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_models::{
    Appointment, AppointmentDetails, AppointmentStatus, Doctor, Entity, NewAppointment,
    NewDoctor, NewPatient, Patient,
};

use crate::schema;
use crate::store::{HospitalStore, StoreError, StoreResult};

const APPOINTMENT_DETAILS_SELECT: &str = r#"
    SELECT a.id, a.patient_id, a.doctor_id, a.appointment_date, a.reason, a.status, a.created_at,
           p.first_name AS patient_first_name, p.last_name AS patient_last_name,
           d.first_name AS doctor_first_name, d.last_name AS doctor_last_name,
           d.specialization
    FROM appointments a
    JOIN patients p ON a.patient_id = p.id
    JOIN doctors d ON a.doctor_id = d.id
"#;

const DOCTOR_HAS_APPOINTMENTS: &str =
    "SELECT EXISTS(SELECT 1 FROM appointments WHERE doctor_id = $1)";
const PATIENT_HAS_APPOINTMENTS: &str =
    "SELECT EXISTS(SELECT 1 FROM appointments WHERE patient_id = $1)";
const DOCTOR_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM doctors WHERE id = $1)";
const PATIENT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM patients WHERE id = $1)";
const APPOINTMENT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM appointments WHERE id = $1)";

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> StoreResult<Self> {
        debug!("Connecting to database with {} max connections", config.database_max_connections);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> StoreResult<()> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database tables initialized");
        Ok(())
    }

    async fn exists(&self, sql: &'static str, id: i32) -> StoreResult<bool> {
        let found = sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn ensure_references(&self, appointment: &NewAppointment) -> StoreResult<()> {
        if !self.exists(PATIENT_EXISTS, appointment.patient_id).await? {
            return Err(StoreError::MissingReference {
                entity: Entity::Patient,
                id: appointment.patient_id,
            });
        }
        if !self.exists(DOCTOR_EXISTS, appointment.doctor_id).await? {
            return Err(StoreError::MissingReference {
                entity: Entity::Doctor,
                id: appointment.doctor_id,
            });
        }
        Ok(())
    }

    /// Runs the guarded delete shared by doctors and patients.
    async fn delete_referenced(
        &self,
        entity: Entity,
        guard_sql: &'static str,
        delete_sql: &'static str,
        id: i32,
    ) -> StoreResult<()> {
        if self.exists(guard_sql, id).await? {
            return Err(StoreError::HasAppointments(entity));
        }

        let result = sqlx::query(delete_sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // An appointment inserted after the guard still trips the foreign key.
                if is_foreign_key_violation(&e) {
                    StoreError::HasAppointments(entity)
                } else {
                    StoreError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity, id });
        }
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

fn map_doctor_write_error(err: sqlx::Error, doctor: &NewDoctor) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateLicense(doctor.license_number.clone())
    } else {
        StoreError::Database(err)
    }
}

fn map_appointment_write_error(err: sqlx::Error, appointment: &NewAppointment) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return match db.constraint() {
                Some(c) if c.contains("doctor") => StoreError::MissingReference {
                    entity: Entity::Doctor,
                    id: appointment.doctor_id,
                },
                _ => StoreError::MissingReference {
                    entity: Entity::Patient,
                    id: appointment.patient_id,
                },
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl HospitalStore for PgStore {
    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        let doctors = sqlx::query_as::<_, Doctor>("SELECT * FROM doctors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(doctors)
    }

    async fn get_doctor(&self, id: i32) -> StoreResult<Doctor> {
        sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: Entity::Doctor, id })
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> StoreResult<Doctor> {
        sqlx::query_as::<_, Doctor>(
            r#"
            INSERT INTO doctors (first_name, last_name, specialization, email, phone, license_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&doctor.first_name)
        .bind(&doctor.last_name)
        .bind(&doctor.specialization)
        .bind(&doctor.email)
        .bind(&doctor.phone)
        .bind(&doctor.license_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_doctor_write_error(e, doctor))
    }

    async fn update_doctor(&self, id: i32, doctor: &NewDoctor) -> StoreResult<Doctor> {
        sqlx::query_as::<_, Doctor>(
            r#"
            UPDATE doctors
            SET first_name = $1, last_name = $2, specialization = $3,
                email = $4, phone = $5, license_number = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&doctor.first_name)
        .bind(&doctor.last_name)
        .bind(&doctor.specialization)
        .bind(&doctor.email)
        .bind(&doctor.phone)
        .bind(&doctor.license_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_doctor_write_error(e, doctor))?
        .ok_or(StoreError::NotFound { entity: Entity::Doctor, id })
    }

    async fn delete_doctor(&self, id: i32) -> StoreResult<()> {
        self.delete_referenced(
            Entity::Doctor,
            DOCTOR_HAS_APPOINTMENTS,
            "DELETE FROM doctors WHERE id = $1",
            id,
        )
        .await
    }

    async fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let patients = sqlx::query_as::<_, Patient>("SELECT * FROM patients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(patients)
    }

    async fn get_patient(&self, id: i32) -> StoreResult<Patient> {
        sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: Entity::Patient, id })
    }

    async fn create_patient(&self, patient: &NewPatient) -> StoreResult<Patient> {
        let created = sqlx::query_as::<_, Patient>(
            r#"
            INSERT INTO patients (first_name, last_name, date_of_birth, gender, phone, email, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.date_of_birth)
        .bind(&patient.gender)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(&patient.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_patient(&self, id: i32, patient: &NewPatient) -> StoreResult<Patient> {
        sqlx::query_as::<_, Patient>(
            r#"
            UPDATE patients
            SET first_name = $1, last_name = $2, date_of_birth = $3, gender = $4,
                phone = $5, email = $6, address = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.date_of_birth)
        .bind(&patient.gender)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(&patient.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: Entity::Patient, id })
    }

    async fn delete_patient(&self, id: i32) -> StoreResult<()> {
        self.delete_referenced(
            Entity::Patient,
            PATIENT_HAS_APPOINTMENTS,
            "DELETE FROM patients WHERE id = $1",
            id,
        )
        .await
    }

    async fn list_appointments(&self) -> StoreResult<Vec<AppointmentDetails>> {
        let sql = format!("{APPOINTMENT_DETAILS_SELECT} ORDER BY a.appointment_date DESC, a.id DESC");
        let appointments = sqlx::query_as::<_, AppointmentDetails>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(appointments)
    }

    async fn get_appointment(&self, id: i32) -> StoreResult<AppointmentDetails> {
        let sql = format!("{APPOINTMENT_DETAILS_SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, AppointmentDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })
    }

    async fn create_appointment(&self, appointment: &NewAppointment) -> StoreResult<Appointment> {
        self.ensure_references(appointment).await?;

        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, appointment_date, reason, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(appointment.patient_id)
        .bind(appointment.doctor_id)
        .bind(appointment.appointment_date)
        .bind(&appointment.reason)
        .bind(appointment.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_appointment_write_error(e, appointment))
    }

    async fn update_appointment(
        &self,
        id: i32,
        appointment: &NewAppointment,
    ) -> StoreResult<Appointment> {
        if !self.exists(APPOINTMENT_EXISTS, id).await? {
            return Err(StoreError::NotFound { entity: Entity::Appointment, id });
        }
        self.ensure_references(appointment).await?;

        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET patient_id = $1, doctor_id = $2, appointment_date = $3, reason = $4, status = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(appointment.patient_id)
        .bind(appointment.doctor_id)
        .bind(appointment.appointment_date)
        .bind(&appointment.reason)
        .bind(appointment.status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_appointment_write_error(e, appointment))?
        .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })
    }

    async fn update_appointment_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> StoreResult<Appointment> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: Entity::Appointment, id })
    }

    async fn delete_appointment(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: Entity::Appointment, id });
        }
        Ok(())
    }
}
