use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn geo_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/nearest", get(handlers::find_nearest_clinic))
        .with_state(state)
}
