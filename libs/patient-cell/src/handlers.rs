use std::sync::Arc;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use shared_models::{AppError, Entity};
use shared_utils::{AppJson, AppPath, AppState};

use crate::models::PatientRequest;
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patients = service.list_patients().await?;

    Ok(Json(json!(patients)))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<PatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = PatientService::new(&state);

    let patient = service.create_patient(request).await?;

    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    AppPath(patient_id): AppPath<i32>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.get_patient(patient_id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    AppPath(patient_id): AppPath<i32>,
    AppJson(request): AppJson<PatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.update_patient(patient_id, request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    AppPath(patient_id): AppPath<i32>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    service.delete_patient(patient_id).await?;

    Ok(Json(json!({
        "message": Entity::Patient.deleted_message()
    })))
}
