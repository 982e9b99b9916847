use std::sync::Arc;

use axum::{routing::get, Router};

use shared_utils::AppState;

use crate::handlers;

pub fn dashboard_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .with_state(state)
}
