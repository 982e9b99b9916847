// libs/dashboard-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::{Appointment, AppointmentDetails, AppointmentStatus};

/// Counts for one chart column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub name: String,
    /// Confirmed appointments.
    pub admitted: u32,
    /// Completed appointments.
    pub discharged: u32,
    /// Appointments whose reason mentions an emergency, whatever their status.
    pub emergency: u32,
}

impl TrendBucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            admitted: 0,
            discharged: 0,
            emergency: 0,
        }
    }

    pub fn record(&mut self, appointment: &Appointment) {
        match appointment.status {
            AppointmentStatus::Confirmed => self.admitted += 1,
            AppointmentStatus::Completed => self.discharged += 1,
            _ => {}
        }
        if appointment.is_emergency() {
            self.emergency += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientTrends {
    pub daily: Vec<TrendBucket>,
    pub weekly: Vec<TrendBucket>,
    pub monthly: Vec<TrendBucket>,
}

/// Doctors and appointment load for one specialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentLoad {
    pub name: String,
    pub doctors: u32,
    pub appointments: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub total_doctors: usize,
    pub todays_appointments: usize,
    pub trends: PatientTrends,
    pub departments: Vec<DepartmentLoad>,
    pub recent_appointments: Vec<AppointmentDetails>,
    pub generated_at: DateTime<Utc>,
}
