use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use shared_config::AppConfig;

use crate::handlers::*;
use crate::services::RegistrationService;

pub fn create_registration_router(config: Arc<AppConfig>) -> Router {
    registration_routes(Arc::new(RegistrationService::from_config(&config)))
}

pub fn registration_routes(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route("/", post(register_patient))
        .route("/validate", post(validate_registration))
        .route("/format-phone", get(format_phone))
        .with_state(service)
}
