use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    pub phone: Option<String>,

    pub age: Option<i32>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(rename = "referralCode")]
    pub referral_code: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(rename = "couponCode")]
    pub coupon_code: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AdminLoginDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Whitelisted user projection. Credential material never appears here.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    #[serde(rename = "referralCode")]
    pub referral_code: String,
    #[serde(rename = "referredBy")]
    pub referred_by: Option<String>,
    #[serde(rename = "referralCount")]
    pub referral_count: i32,
    pub rewards: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            phone: user.phone.clone(),
            age: user.age,
            referral_code: user.referral_code.to_owned(),
            referred_by: user.referred_by.clone(),
            referral_count: user.referral_count,
            rewards: user.rewards,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

/// Projection for referred-user listings: name, email and issued code only.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReferredUserDto {
    pub name: String,
    pub email: String,
    #[serde(rename = "referralCode")]
    pub referral_code: String,
}

impl ReferredUserDto {
    pub fn from_user(user: &User) -> Self {
        ReferredUserDto {
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            referral_code: user.referral_code.to_owned(),
        }
    }

    pub fn from_users(users: &[User]) -> Vec<ReferredUserDto> {
        users.iter().map(ReferredUserDto::from_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponseDto {
    pub status: String,
    pub message: String,
    pub token: String,
    #[serde(rename = "referralCode")]
    pub referral_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub user: FilterUserDto,
    #[serde(rename = "referrerName")]
    pub referrer_name: String,
    #[serde(rename = "totalLogins")]
    pub total_logins: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminLoginResponseDto {
    pub status: String,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: usize,
}

#[derive(Serialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: uuid::Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("08012345678".to_string()),
            age: Some(30),
            password: "$argon2id$v=19$secret".to_string(),
            referral_code: "AB12CD34".to_string(),
            referred_by: None,
            referral_count: 2,
            rewards: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn filtered_user_never_serializes_password() {
        let user = sample_user();
        let json = serde_json::to_string(&FilterUserDto::filter_user(&user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"referralCode\":\"AB12CD34\""));
    }

    #[test]
    fn referred_user_projection_is_minimal() {
        let user = sample_user();
        let value = serde_json::to_value(ReferredUserDto::from_user(&user)).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["email", "name", "referralCode"]);
    }

    #[test]
    fn register_dto_requires_valid_email() {
        let body = RegisterUserDto {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            ..Default::default()
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn login_dto_reads_coupon_code_from_body() {
        let body: LoginUserDto = serde_json::from_str(
            r#"{"email":"ada@example.com","password":"secret1","couponCode":"AB12CD34"}"#,
        )
        .unwrap();
        assert_eq!(body.coupon_code.as_deref(), Some("AB12CD34"));
    }
}
