use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        AdminLoginDto, AdminLoginResponseDto, FilterUserDto, LoginUserDto, RegisterResponseDto,
        RegisterUserDto, UserLoginResponseDto,
    },
    error::{ErrorMessage, HttpError},
    mail::mails,
    service::referral,
    utils::{password, token},
    AppState,
};

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::conflict(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let outcome = referral::register_user(&app_state.db_client, body, hashed_password).await?;

    let token = token::create_token(
        &outcome.user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Delivery failures never fail the signup; they are logged and the
    // response goes out regardless.
    let mailer = app_state.mailer.clone();
    let user = outcome.user.clone();
    let referrer = outcome.referrer.clone();
    tokio::spawn(async move {
        if let Err(e) =
            mails::send_welcome_email(&mailer, &user.email, &user.name, &user.referral_code).await
        {
            tracing::error!("welcome email to {} failed: {}", user.email, e);
        }

        if let Some(referrer) = referrer {
            if let Err(e) = mails::send_referral_success_email(
                &mailer,
                &referrer.email,
                &referrer.name,
                &user.name,
                &referrer.referral_code,
            )
            .await
            {
                tracing::error!("referral success email to {} failed: {}", referrer.email, e);
            }
        }
    });

    let response = RegisterResponseDto {
        status: "success".to_string(),
        message: "User registered successfully".to_string(),
        token,
        referral_code: outcome.user.referral_code,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::invalid_credentials(ErrorMessage::WrongCredentials.to_string())
        })?;

    let password_matches = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::invalid_credentials(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matches {
        return Err(HttpError::invalid_credentials(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let attribution =
        referral::record_login_attribution(&app_state.db_client, body.coupon_code.as_deref())
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(time::Duration::minutes(app_state.env.jwt_maxage))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build session cookie"))?,
    );

    let response = UserLoginResponseDto {
        status: "success".to_string(),
        token,
        user: FilterUserDto::filter_user(&user),
        referrer_name: attribution.referrer_name,
        total_logins: attribution.total_logins,
    };

    Ok((headers, Json(response)))
}

pub async fn admin_login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AdminLoginDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.email != app_state.env.admin_email || body.password != app_state.env.admin_password {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        "admin",
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = AdminLoginResponseDto {
        status: "success".to_string(),
        token,
        message: "Admin logged in successfully".to_string(),
    };

    Ok(Json(response))
}
