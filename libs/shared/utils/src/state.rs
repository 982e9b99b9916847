use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::HospitalStore;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn HospitalStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn HospitalStore>) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> Arc<dyn HospitalStore> {
        self.store.clone()
    }
}
