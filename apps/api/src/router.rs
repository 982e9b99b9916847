use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::appointment_routes;
use dashboard_cell::dashboard_routes;
use doctor_cell::doctor_routes;
use patient_cell::create_patient_router;
use shared_utils::AppState;

pub const BANNER: &str = "Hospital Management API is running";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .nest("/api/doctors", doctor_routes(state.clone()))
        .nest("/api/patients", create_patient_router(state.clone()))
        .nest("/api/appointments", appointment_routes(state.clone()))
        .nest("/api/dashboard", dashboard_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use shared_utils::test_utils::{TestConfig, TestPayloads, TestRequests};

    fn app() -> Router {
        create_router(TestConfig::default().to_state())
    }

    #[tokio::test]
    async fn banner_is_served_at_root() {
        let response = app().oneshot(TestRequests::empty(Method::GET, "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], BANNER.as_bytes());
    }

    #[tokio::test]
    async fn booking_blocks_doctor_deletion() {
        let app = app();

        let response = app
            .clone()
            .oneshot(TestRequests::json(Method::POST, "/api/doctors", TestPayloads::doctor("L123")))
            .await
            .unwrap();
        let (status, doctor) = TestRequests::read_json(response).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(doctor["id"], 1);
        assert_eq!(doctor["license_number"], "L123");

        let response = app
            .clone()
            .oneshot(TestRequests::json(Method::POST, "/api/patients", TestPayloads::patient()))
            .await
            .unwrap();
        let (status, patient) = TestRequests::read_json(response).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(patient["id"], 1);

        let response = app
            .clone()
            .oneshot(TestRequests::json(
                Method::POST,
                "/api/appointments",
                TestPayloads::appointment(1, 1, "2024-01-01T10:00:00Z"),
            ))
            .await
            .unwrap();
        let (status, appointment) = TestRequests::read_json(response).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(appointment["status"], "scheduled");

        let response = app
            .clone()
            .oneshot(TestRequests::empty(Method::DELETE, "/api/doctors/1"))
            .await
            .unwrap();
        let (status, body) = TestRequests::read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cannot delete doctor with appointments");

        let response = app
            .oneshot(TestRequests::empty(Method::GET, "/api/dashboard"))
            .await
            .unwrap();
        let (status, dashboard) = TestRequests::read_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["departments"][0]["appointments"], 1);
    }
}
