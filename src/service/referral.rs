//! Referral attribution and reward accrual.
//!
//! Registration issues every user a short unique code. When a signup cites an
//! existing code, an attribution edge is recorded and the referrer's counter
//! bumped; when a login presents a coupon code, the edge's login counter and
//! the referrer's reward counter are bumped. All counter updates are atomic
//! at the store.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, referraldb::ReferralExt, userdb::UserExt},
    dtos::userdtos::RegisterUserDto,
    error::{ErrorMessage, HttpError},
    models::usermodel::User,
};

/// Sentinel reported when a login's coupon code resolves to no referrer.
pub const UNKNOWN_REFERRER: &str = "Unknown";

const REFERRAL_CODE_LENGTH: usize = 8;

// Collisions on an 8-hex-char code are unlikely but real; the unique index on
// users.referral_code is the enforcement point and inserts retry on conflict.
const MAX_CODE_ATTEMPTS: usize = 4;

#[derive(Debug, Error)]
pub enum ReferralError {
    #[error("email already registered")]
    EmailTaken,

    #[error("could not issue a unique referral code")]
    CodeSpaceExhausted,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ReferralError> for HttpError {
    fn from(error: ReferralError) -> Self {
        match error {
            ReferralError::EmailTaken => HttpError::conflict(ErrorMessage::EmailExist.to_string()),
            ReferralError::CodeSpaceExhausted | ReferralError::Database(_) => {
                HttpError::server_error(error.to_string())
            }
        }
    }
}

pub fn generate_referral_code() -> String {
    Uuid::new_v4().simple().to_string()[..REFERRAL_CODE_LENGTH].to_uppercase()
}

pub fn generate_referral_link(base_url: &str, code: &str) -> String {
    format!("{}/register?ref={}", base_url, code)
}

#[derive(Debug)]
pub struct RegistrationOutcome {
    pub user: User,
    /// Present only when the supplied code resolved to an existing user.
    pub referrer: Option<User>,
}

#[derive(Debug, PartialEq)]
pub struct LoginAttribution {
    pub referrer_name: String,
    pub total_logins: i32,
}

impl Default for LoginAttribution {
    fn default() -> Self {
        LoginAttribution {
            referrer_name: UNKNOWN_REFERRER.to_string(),
            total_logins: 0,
        }
    }
}

/// Creates the user record and, when the cited referral code resolves,
/// records the attribution edge and bumps the referrer's counter.
///
/// An unknown code is not an error: the signup proceeds unreferred.
pub async fn register_user(
    db: &DBClient,
    body: RegisterUserDto,
    password_hash: String,
) -> Result<RegistrationOutcome, ReferralError> {
    let referrer = match body.referral_code.as_deref() {
        Some(code) => {
            let found = db.get_user(None, None, Some(code)).await?;
            if found.is_none() {
                tracing::debug!(code, "referral code did not resolve, proceeding unreferred");
            }
            found
        }
        None => None,
    };

    let referred_by = referrer.as_ref().map(|r| r.referral_code.clone());

    let mut attempts = 0;
    let user = loop {
        let issued_code = generate_referral_code();
        match db
            .save_user(
                body.name.clone(),
                body.email.clone(),
                body.phone.clone(),
                body.age,
                password_hash.clone(),
                issued_code,
                referred_by.clone(),
            )
            .await
        {
            Ok(user) => break user,
            Err(e) if is_unique_violation(&e, "users_email_key") => {
                return Err(ReferralError::EmailTaken);
            }
            Err(e) if is_unique_violation(&e, "users_referral_code_key") => {
                attempts += 1;
                if attempts >= MAX_CODE_ATTEMPTS {
                    return Err(ReferralError::CodeSpaceExhausted);
                }
                tracing::warn!(attempts, "referral code collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    };

    if let Some(ref referrer) = referrer {
        db.increment_referral_count(&referrer.referral_code).await?;
        db.create_referral(&referrer.referral_code, &user.email, &referrer.referral_code)
            .await?;

        tracing::info!(
            referrer = %referrer.email,
            referee = %user.email,
            code = %referrer.referral_code,
            "referral attributed"
        );
    }

    Ok(RegistrationOutcome { user, referrer })
}

/// Login-side attribution: a presented coupon code bumps the matching
/// referral's login counter and accrues one reward to the referrer.
///
/// No coupon or no matching referral leaves all state untouched and reports
/// the unknown sentinel. A referral whose referrer was since deleted still
/// counts the login but accrues nothing.
pub async fn record_login_attribution(
    db: &DBClient,
    coupon_code: Option<&str>,
) -> Result<LoginAttribution, sqlx::Error> {
    let Some(code) = coupon_code else {
        return Ok(LoginAttribution::default());
    };

    let Some(referral) = db.increment_login_count(code).await? else {
        return Ok(LoginAttribution::default());
    };

    match db.increment_rewards(&referral.referrer).await? {
        Some(referrer) => {
            tracing::info!(
                referrer = %referrer.email,
                coupon = code,
                total_logins = referral.login_count,
                "reward accrued on referred login"
            );
            Ok(LoginAttribution {
                referrer_name: referrer.name,
                total_logins: referral.login_count,
            })
        }
        None => {
            // Dangling edge: the referrer was deleted after the referral was
            // recorded.
            tracing::warn!(coupon = code, "referral edge has no referrer");
            Ok(LoginAttribution {
                referrer_name: UNKNOWN_REFERRER.to_string(),
                total_logins: referral.login_count,
            })
        }
    }
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referral_code_is_short_upper_hex() {
        let code = generate_referral_code();
        assert_eq!(code.len(), REFERRAL_CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn referral_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..64).map(|_| generate_referral_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn referral_link_embeds_code() {
        let link = generate_referral_link("https://app.example.com", "AB12CD34");
        assert_eq!(link, "https://app.example.com/register?ref=AB12CD34");
    }

    #[test]
    fn default_attribution_is_unknown_with_zero_logins() {
        let attribution = LoginAttribution::default();
        assert_eq!(attribution.referrer_name, UNKNOWN_REFERRER);
        assert_eq!(attribution.total_logins, 0);
    }

    #[test]
    fn email_taken_maps_to_conflict() {
        let err: HttpError = ReferralError::EmailTaken.into();
        assert_eq!(err.code, crate::error::ErrorCode::Conflict);
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
