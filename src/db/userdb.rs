// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::usermodel::User;

#[async_trait]
pub trait UserExt {
    /// Look a user up by exactly one of id, email or referral code.
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        referral_code: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn get_user_emails(&self) -> Result<Vec<String>, sqlx::Error>;

    async fn get_users_referred_by(
        &self,
        referral_code: &str,
    ) -> Result<Vec<User>, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        phone: Option<String>,
        age: Option<i32>,
        password: T,
        referral_code: T,
        referred_by: Option<String>,
    ) -> Result<User, sqlx::Error>;

    /// Store-level atomic increment, safe under concurrent registrations
    /// citing the same referrer.
    async fn increment_referral_count(
        &self,
        referral_code: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Store-level atomic increment of the reward counter.
    async fn increment_rewards(
        &self,
        referral_code: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        referral_code: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, email, phone, age, password,
                    referral_code, referred_by, referral_count, rewards,
                    created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, email, phone, age, password,
                    referral_code, referred_by, referral_count, rewards,
                    created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(referral_code) = referral_code {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, email, phone, age, password,
                    referral_code, referred_by, referral_count, rewards,
                    created_at, updated_at
                FROM users
                WHERE referral_code = $1
                "#,
            )
            .bind(referral_code)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, name, email, phone, age, password,
                referral_code, referred_by, referral_count, rewards,
                created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_emails(&self) -> Result<Vec<String>, sqlx::Error> {
        let emails: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT email FROM users ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(emails.into_iter().map(|(email,)| email).collect())
    }

    async fn get_users_referred_by(
        &self,
        referral_code: &str,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, name, email, phone, age, password,
                referral_code, referred_by, referral_count, rewards,
                created_at, updated_at
            FROM users
            WHERE referred_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(referral_code)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        phone: Option<String>,
        age: Option<i32>,
        password: T,
        referral_code: T,
        referred_by: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, age, password, referral_code, referred_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, name, email, phone, age, password,
                referral_code, referred_by, referral_count, rewards,
                created_at, updated_at
            "#,
        )
        .bind(name.into())
        .bind(email.into())
        .bind(phone)
        .bind(age)
        .bind(password.into())
        .bind(referral_code.into())
        .bind(referred_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn increment_referral_count(
        &self,
        referral_code: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET referral_count = referral_count + 1,
                updated_at = NOW()
            WHERE referral_code = $1
            RETURNING
                id, name, email, phone, age, password,
                referral_code, referred_by, referral_count, rewards,
                created_at, updated_at
            "#,
        )
        .bind(referral_code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn increment_rewards(
        &self,
        referral_code: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET rewards = rewards + 1,
                updated_at = NOW()
            WHERE referral_code = $1
            RETURNING
                id, name, email, phone, age, password,
                referral_code, referred_by, referral_count, rewards,
                created_at, updated_at
            "#,
        )
        .bind(referral_code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING
                id, name, email, phone, age, password,
                referral_code, referred_by, referral_count, rewards,
                created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}
