use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use shared_database::HospitalStore;
use shared_models::AppError;
use shared_utils::AppState;

use crate::models::DashboardSummary;
use crate::services::{department_load, patient_trends};

pub const RECENT_APPOINTMENTS: usize = 5;

pub struct DashboardService {
    store: Arc<dyn HospitalStore>,
}

impl DashboardService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store(),
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        self.summary_at(Utc::now()).await
    }

    /// Reads doctors, patients and appointments concurrently, then aggregates
    /// that snapshot relative to `now`.
    pub async fn summary_at(&self, now: DateTime<Utc>) -> Result<DashboardSummary, AppError> {
        debug!("Building dashboard summary");

        let (doctors, patients, appointments) = tokio::try_join!(
            self.store.list_doctors(),
            self.store.list_patients(),
            self.store.list_appointments(),
        )?;

        let today = now.date_naive();
        let todays_appointments = appointments
            .iter()
            .filter(|a| a.appointment.appointment_date.date_naive() == today)
            .count();

        let trends = patient_trends(appointments.iter().map(|a| &a.appointment), now);
        let departments = department_load(&doctors, appointments.iter().map(|a| &a.appointment));

        debug!(
            "Dashboard: {} doctors, {} patients, {} appointments",
            doctors.len(),
            patients.len(),
            appointments.len()
        );

        Ok(DashboardSummary {
            total_patients: patients.len(),
            total_doctors: doctors.len(),
            todays_appointments,
            trends,
            departments,
            // Listed newest first by the store.
            recent_appointments: appointments.into_iter().take(RECENT_APPOINTMENTS).collect(),
            generated_at: now,
        })
    }
}
