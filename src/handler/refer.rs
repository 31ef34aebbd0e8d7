use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{FilterUserDto, ReferredUserDto, UserListResponseDto},
    error::{ErrorMessage, HttpError},
    AppState,
};

pub async fn get_referral_data(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .get_users()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = UserListResponseDto {
        status: "success".to_string(),
        results: users.len(),
        users: FilterUserDto::filter_users(&users),
    };

    Ok(Json(response))
}

pub async fn get_user_by_email(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(None, Some(&email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "user": FilterUserDto::filter_user(&user),
    })))
}

/// Lists the users who registered through the given referral code. A code
/// that referred nobody (or does not exist) yields an empty list, not 404.
pub async fn get_referred_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let referred = app_state
        .db_client
        .get_users_referred_by(&code)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "referralCode": code,
        "results": referred.len(),
        "referredUsers": ReferredUserDto::from_users(&referred),
    })))
}

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    tracing::info!(user = %deleted.email, "user deleted");

    Ok(Json(json!({
        "status": "success",
        "message": "User deleted successfully",
        "user": FilterUserDto::filter_user(&deleted),
    })))
}
