// libs/dashboard-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_models::AppError;
use shared_utils::AppState;

use crate::services::DashboardService;

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let dashboard_service = DashboardService::new(&state);

    let summary = dashboard_service.summary().await?;

    Ok(Json(json!(summary)))
}
