use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::SendMessageRequest;
use crate::services::messages::MessageService;

#[axum::debug_handler]
pub async fn list_conversations(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let message_service = MessageService::new(&state);

    let conversations = message_service
        .list_conversations(&user.id, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({ "conversations": conversations })))
}

/// One poll of an open conversation. Clients call this on a fixed interval;
/// there is no push channel.
#[axum::debug_handler]
pub async fn get_conversation(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(partner_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let message_service = MessageService::new(&state);

    let messages = message_service
        .list_conversation(&user.id, &partner_id, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "messages": messages,
        "poll_interval_secs": state.chat_poll_interval_secs
    })))
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let message_service = MessageService::new(&state);

    let message = message_service
        .send_message(&user.id, request, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(message)))
}
