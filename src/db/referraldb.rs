// db/referraldb.rs
use async_trait::async_trait;

use super::db::DBClient;

use crate::models::referralmodel::Referral;

#[async_trait]
pub trait ReferralExt {
    async fn create_referral(
        &self,
        referrer: &str,
        referee: &str,
        coupon_code: &str,
    ) -> Result<Referral, sqlx::Error>;

    /// Atomically bumps the login counter for the referral matching
    /// `coupon_code`, returning the updated row. No row, no mutation.
    async fn increment_login_count(
        &self,
        coupon_code: &str,
    ) -> Result<Option<Referral>, sqlx::Error>;
}

#[async_trait]
impl ReferralExt for DBClient {
    async fn create_referral(
        &self,
        referrer: &str,
        referee: &str,
        coupon_code: &str,
    ) -> Result<Referral, sqlx::Error> {
        sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (referrer, referee, coupon_code)
            VALUES ($1, $2, $3)
            RETURNING
                id, referrer, referee, campaign, coupon_code, login_count, created_at
            "#,
        )
        .bind(referrer)
        .bind(referee)
        .bind(coupon_code)
        .fetch_one(&self.pool)
        .await
    }

    async fn increment_login_count(
        &self,
        coupon_code: &str,
    ) -> Result<Option<Referral>, sqlx::Error> {
        sqlx::query_as::<_, Referral>(
            r#"
            UPDATE referrals
            SET login_count = login_count + 1
            WHERE id = (
                SELECT id FROM referrals WHERE coupon_code = $1 ORDER BY created_at LIMIT 1
            )
            RETURNING
                id, referrer, referee, campaign, coupon_code, login_count, created_at
            "#,
        )
        .bind(coupon_code)
        .fetch_optional(&self.pool)
        .await
    }
}
