use std::sync::Arc;

use axum::{response::IntoResponse, Extension, Json};
use tokio::task::JoinSet;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::maildtos::{BroadcastMailDto, BroadcastResultDto, SendUserMailDto},
    dtos::userdtos::Response,
    error::{ErrorMessage, HttpError},
    mail::mails,
    service::referral,
    AppState,
};

/// Sends the given subject/message to every registered user. Deliveries run
/// concurrently and fail independently; the response reports both tallies.
pub async fn broadcast_email(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<BroadcastMailDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let emails = app_state
        .db_client
        .get_user_emails()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if emails.is_empty() {
        return Err(HttpError::not_found("No users found to email".to_string()));
    }

    let total = emails.len();
    let mut deliveries = JoinSet::new();

    for email in emails {
        let mailer = app_state.mailer.clone();
        let subject = body.subject.clone();
        let message = body.message.clone();
        deliveries.spawn(async move {
            mails::send_campaign_broadcast_email(&mailer, &email, &subject, &message)
                .await
                .is_ok()
        });
    }

    let mut sent = 0;
    while let Some(result) = deliveries.join_next().await {
        if matches!(result, Ok(true)) {
            sent += 1;
        }
    }

    let failed = total - sent;
    tracing::info!(sent, failed, "broadcast finished");

    let response = BroadcastResultDto {
        status: "success".to_string(),
        message: format!("Broadcast sent to {} of {} users", sent, total),
        sent,
        failed,
    };

    Ok(Json(response))
}

/// Re-sends a user their referral code along with a signup link to share.
pub async fn send_user_mail(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SendUserMailDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    let register_link = referral::generate_referral_link(&app_state.env.app_url, &user.referral_code);

    mails::send_referral_reminder_email(
        &app_state.mailer,
        &user.email,
        &user.name,
        &user.referral_code,
        &register_link,
    )
    .await
    .map_err(|e| HttpError::server_error(format!("Failed to send email: {}", e)))?;

    Ok(Json(Response {
        status: "success",
        message: format!("Referral code sent to {}", user.email),
    }))
}
