use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response, StatusCode},
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::{HospitalStore, MemoryStore};

use crate::state::AppState;

pub struct TestConfig {
    pub database_url: String,
    pub port: u16,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            port: 5000,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: self.port,
        }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn to_state(&self) -> Arc<AppState> {
        self.with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(&self, store: Arc<dyn HospitalStore>) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config(), store))
    }
}

pub struct TestRequests;

impl TestRequests {
    pub fn json(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn empty(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }
}

/// Request bodies shaped like the ones the admin UI posts.
pub struct TestPayloads;

impl TestPayloads {
    pub fn doctor(license_number: &str) -> Value {
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "specialization": "Cardiology",
            "email": "jane.doe@hospital.org",
            "phone": "",
            "license_number": license_number
        })
    }

    pub fn doctor_in(specialization: &str, license_number: &str) -> Value {
        let mut doctor = Self::doctor(license_number);
        doctor["specialization"] = json!(specialization);
        doctor
    }

    pub fn patient() -> Value {
        json!({
            "first_name": "John",
            "last_name": "Smith",
            "date_of_birth": "1980-05-17",
            "gender": "Male",
            "phone": "555-010-1234",
            "email": "",
            "address": "12 Harbour Road"
        })
    }

    pub fn appointment(patient_id: i32, doctor_id: i32, appointment_date: &str) -> Value {
        json!({
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "appointment_date": appointment_date,
            "reason": "checkup"
        })
    }
}
