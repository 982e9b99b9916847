// libs/dashboard-cell/tests/integration_test.rs

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use dashboard_cell::{dashboard_routes, DashboardService};
use shared_database::{HospitalStore, MemoryStore};
use shared_models::{AppointmentStatus, NewAppointment, NewDoctor, NewPatient};
use shared_utils::test_utils::{TestConfig, TestRequests};

fn new_doctor(specialization: &str, license: &str) -> NewDoctor {
    NewDoctor {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        specialization: specialization.into(),
        email: None,
        phone: None,
        license_number: license.into(),
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.create_doctor(&new_doctor("Cardiology", "L1")).await.unwrap();
    store.create_doctor(&new_doctor("Neurology", "L2")).await.unwrap();
    store
        .create_patient(&NewPatient {
            first_name: "John".into(),
            last_name: "Smith".into(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
            gender: "Male".into(),
            phone: None,
            email: None,
            address: None,
        })
        .await
        .unwrap();
    store
}

async fn book(
    store: &MemoryStore,
    doctor_id: i32,
    days_ago: i64,
    status: AppointmentStatus,
    reason: &str,
) {
    store
        .create_appointment(&NewAppointment {
            patient_id: 1,
            doctor_id,
            appointment_date: Utc::now() - Duration::days(days_ago),
            reason: Some(reason.into()),
            status,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dashboard_counts_todays_activity() {
    let store = seeded_store().await;
    book(&store, 1, 0, AppointmentStatus::Confirmed, "checkup").await;
    book(&store, 1, 0, AppointmentStatus::Scheduled, "Emergency visit").await;
    book(&store, 2, 10, AppointmentStatus::Completed, "follow up").await;
    let app = dashboard_routes(TestConfig::default().with_store(store.clone()));

    let response = app.oneshot(TestRequests::empty(Method::GET, "/")).await.unwrap();
    let (status, body) = TestRequests::read_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_doctors"], 2);
    assert_eq!(body["total_patients"], 1);
    assert_eq!(body["todays_appointments"], 2);

    let today = &body["trends"]["daily"][6];
    assert_eq!(today["admitted"], 1);
    assert_eq!(today["emergency"], 1);
    assert_eq!(today["discharged"], 0);
    assert_eq!(body["trends"]["weekly"][3]["name"], "Week 1");
    assert_eq!(body["trends"]["weekly"][2]["discharged"], 1);
    assert_eq!(body["trends"]["monthly"].as_array().unwrap().len(), 6);

    assert_eq!(body["departments"][0]["name"], "Cardiology");
    assert_eq!(body["departments"][0]["appointments"], 2);
    assert_eq!(body["departments"][1]["name"], "Neurology");
    assert_eq!(body["departments"][1]["doctors"], 1);
}

#[tokio::test]
async fn test_recent_appointments_are_capped_and_newest_first() {
    let store = seeded_store().await;
    for days_ago in [3, 1, 7, 0, 5, 2] {
        book(&store, 1, days_ago, AppointmentStatus::Scheduled, "checkup").await;
    }
    let state = TestConfig::default().with_store(store.clone());

    let summary = DashboardService::new(&state).summary().await.unwrap();

    let ids: Vec<i32> = summary
        .recent_appointments
        .iter()
        .map(|a| a.appointment.id)
        .collect();
    assert_eq!(ids, vec![4, 2, 6, 1, 5]);
    assert_eq!(summary.recent_appointments[0].patient_first_name, "John");
}

#[tokio::test]
async fn test_empty_dashboard() {
    let app = dashboard_routes(TestConfig::default().to_state());

    let response = app.oneshot(TestRequests::empty(Method::GET, "/")).await.unwrap();
    let (status, body) = TestRequests::read_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_patients"], 0);
    assert_eq!(body["trends"]["daily"].as_array().unwrap().len(), 7);
    assert!(body["departments"].as_array().unwrap().is_empty());
    assert!(body["recent_appointments"].as_array().unwrap().is_empty());
}
