pub mod appointment;
pub mod doctor;
pub mod entity;
pub mod error;
pub mod patient;

pub use appointment::{Appointment, AppointmentDetails, AppointmentStatus, NewAppointment, UnknownStatus};
pub use doctor::{Doctor, NewDoctor};
pub use entity::Entity;
pub use error::AppError;
pub use patient::{NewPatient, Patient};
