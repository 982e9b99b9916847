use std::fmt;

use serde::{Deserialize, Serialize};

/// The three record kinds the hospital API manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Doctor,
    Patient,
    Appointment,
}

impl Entity {
    /// Capitalised name used at the start of API messages ("Doctor not found").
    pub fn title(&self) -> &'static str {
        match self {
            Entity::Doctor => "Doctor",
            Entity::Patient => "Patient",
            Entity::Appointment => "Appointment",
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.title())
    }

    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully", self.title())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Doctor => write!(f, "doctor"),
            Entity::Patient => write!(f, "patient"),
            Entity::Appointment => write!(f, "appointment"),
        }
    }
}
