use std::collections::HashMap;

use shared_models::{Appointment, Doctor};

use crate::models::DepartmentLoad;

/// Groups doctors by specialization, in the order each specialization first
/// appears among doctors sorted by id, and counts the appointments booked with
/// each group. Specializations with no appointments are still listed.
pub fn department_load<'a, I>(doctors: &[Doctor], appointments: I) -> Vec<DepartmentLoad>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut sorted: Vec<&Doctor> = doctors.iter().collect();
    sorted.sort_by_key(|d| d.id);

    let mut departments: Vec<DepartmentLoad> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    let mut by_doctor: HashMap<i32, usize> = HashMap::new();

    for doctor in sorted {
        let index = *by_name
            .entry(doctor.specialization.as_str())
            .or_insert_with(|| {
                departments.push(DepartmentLoad {
                    name: doctor.specialization.clone(),
                    doctors: 0,
                    appointments: 0,
                });
                departments.len() - 1
            });
        departments[index].doctors += 1;
        by_doctor.insert(doctor.id, index);
    }

    for appointment in appointments {
        if let Some(&index) = by_doctor.get(&appointment.doctor_id) {
            departments[index].appointments += 1;
        }
    }

    departments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_models::AppointmentStatus;

    fn doctor(id: i32, specialization: &str) -> Doctor {
        Doctor {
            id,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            specialization: specialization.into(),
            email: None,
            phone: None,
            license_number: format!("L{}", id),
            created_at: Utc::now(),
        }
    }

    fn booked_with(doctor_id: i32) -> Appointment {
        Appointment {
            id: doctor_id,
            patient_id: 1,
            doctor_id,
            appointment_date: Utc::now(),
            reason: None,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let doctors = vec![
            doctor(3, "Cardiology"),
            doctor(1, "Neurology"),
            doctor(2, "Cardiology"),
            doctor(4, "Pediatrics"),
        ];
        let appointments = vec![booked_with(2), booked_with(3), booked_with(1), booked_with(99)];

        let departments = department_load(&doctors, &appointments);

        assert_eq!(
            departments,
            vec![
                DepartmentLoad { name: "Neurology".into(), doctors: 1, appointments: 1 },
                DepartmentLoad { name: "Cardiology".into(), doctors: 2, appointments: 2 },
                DepartmentLoad { name: "Pediatrics".into(), doctors: 1, appointments: 0 },
            ]
        );
    }

    #[test]
    fn no_doctors_means_no_departments() {
        let appointments = vec![booked_with(1)];
        assert!(department_load(&[], &appointments).is_empty());
    }
}
