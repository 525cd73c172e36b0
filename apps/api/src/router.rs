use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use chat_cell::router::chat_routes;
use doctor_cell::router::doctor_routes;
use geo_cell::router::geo_routes;
use patient_cell::router::patient_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Medilink API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/geo", geo_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/chat", chat_routes(state.clone()))
}
