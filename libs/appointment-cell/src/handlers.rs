// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use shared_models::{AppError, Entity};
use shared_utils::{AppJson, AppPath, AppState};

use crate::models::{AppointmentRequest, StatusUpdateRequest};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointments = appointment_service.list_appointments().await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    AppPath(appointment_id): AppPath<i32>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<AppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service.create_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    AppPath(appointment_id): AppPath<i32>,
    AppJson(request): AppJson<AppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service
        .update_appointment(appointment_id, request)
        .await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    AppPath(appointment_id): AppPath<i32>,
    AppJson(request): AppJson<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    let appointment = appointment_service
        .update_status(appointment_id, request)
        .await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    AppPath(appointment_id): AppPath<i32>,
) -> Result<Json<Value>, AppError> {
    let appointment_service = AppointmentService::new(&state);

    appointment_service.delete_appointment(appointment_id).await?;

    Ok(Json(json!({
        "message": Entity::Appointment.deleted_message()
    })))
}
