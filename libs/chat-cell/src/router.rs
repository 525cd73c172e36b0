use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn chat_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/conversations", get(handlers::list_conversations))
        .route("/messages/{partner_id}", get(handlers::get_conversation))
        .route("/messages", post(handlers::send_message))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
