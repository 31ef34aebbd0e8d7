use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    EmptyPassword,
    ExceededMaxPasswordLength(usize),
    HashingError,
    InvalidHashFormat,
    WrongCredentials,
    EmailExist,
    UserNotFound,
    CampaignNotFound,
}

impl ErrorMessage {
    fn to_str(&self) -> String {
        match self {
            ErrorMessage::EmptyPassword => "Password cannot be empty".to_string(),
            ErrorMessage::ExceededMaxPasswordLength(max_length) => {
                format!("Password must not be more than {} characters", max_length)
            }
            ErrorMessage::HashingError => "Error while hashing password".to_string(),
            ErrorMessage::InvalidHashFormat => "Invalid password hash format".to_string(),
            ErrorMessage::WrongCredentials => "Invalid credentials".to_string(),
            ErrorMessage::EmailExist => "User already exists with this email".to_string(),
            ErrorMessage::UserNotFound => "User not found".to_string(),
            ErrorMessage::CampaignNotFound => "Campaign not found".to_string(),
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Stable machine-readable error classes returned to clients. Internal error
/// detail never crosses this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Conflict,
    NotFound,
    InvalidCredentials,
    ValidationError,
    Unauthorized,
    DependencyFailure,
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub code: ErrorCode,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: ErrorCode, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            code,
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::ValidationError, StatusCode::BAD_REQUEST)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        // Duplicate unique field. Clients expect 400 here, not 409.
        Self::new(message, ErrorCode::Conflict, StatusCode::BAD_REQUEST)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::InvalidCredentials, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::NotFound, StatusCode::NOT_FOUND)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(
            message,
            ErrorCode::DependencyFailure,
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }

    pub fn into_http_response(self) -> axum::response::Response {
        let status_label = if self.status.is_server_error() {
            "error"
        } else {
            "fail"
        };

        let body = Json(ErrorResponse {
            status: status_label,
            code: self.code,
            message: self.message,
        });

        (self.status, body).into_response()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response()
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: ErrorCode,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_client_error_with_stable_code() {
        let err = HttpError::conflict(ErrorMessage::EmailExist.to_string());
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "User already exists with this email");
    }

    #[test]
    fn error_codes_serialize_snake_case() {
        let json = serde_json::to_string(&ErrorCode::InvalidCredentials).unwrap();
        assert_eq!(json, "\"invalid_credentials\"");
        let json = serde_json::to_string(&ErrorCode::DependencyFailure).unwrap();
        assert_eq!(json, "\"dependency_failure\"");
    }

    #[test]
    fn server_errors_use_error_status_label() {
        let response = HttpError::server_error("db down").into_http_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
