use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::UpdateProfileRequest;
use crate::services::profile::ProfileService;

#[axum::debug_handler]
pub async fn get_my_profile(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let profile_service = ProfileService::new(&state);

    let profile = profile_service
        .get_profile(&user.id, auth.token())
        .await
        .map_err(|_| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(json!(profile)))
}

#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let profile_service = ProfileService::new(&state);

    let profile = profile_service
        .update_profile(&user.id, request, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(profile)))
}
