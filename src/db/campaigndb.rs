// db/campaigndb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::{
    dtos::campaigndtos::{CreateCampaignDto, UpdateCampaignDto},
    models::campaignmodel::{Campaign, CampaignStatus},
};

#[async_trait]
pub trait CampaignExt {
    async fn save_campaign(
        &self,
        campaign_data: CreateCampaignDto,
    ) -> Result<Campaign, sqlx::Error>;

    async fn get_campaigns(&self) -> Result<Vec<Campaign>, sqlx::Error>;

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, sqlx::Error>;

    async fn update_campaign(
        &self,
        campaign_id: Uuid,
        campaign_data: UpdateCampaignDto,
    ) -> Result<Option<Campaign>, sqlx::Error>;

    async fn delete_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, sqlx::Error>;
}

#[async_trait]
impl CampaignExt for DBClient {
    async fn save_campaign(
        &self,
        campaign_data: CreateCampaignDto,
    ) -> Result<Campaign, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (
                title, about_campaign, start_date, end_date,
                reward_type, reward_format, discount_value, campaign_message, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, title, about_campaign, start_date, end_date,
                reward_type, reward_format, discount_value, campaign_message, status,
                created_at, updated_at
            "#,
        )
        .bind(campaign_data.title)
        .bind(campaign_data.about_campaign)
        .bind(campaign_data.start_date)
        .bind(campaign_data.end_date)
        .bind(campaign_data.reward_type)
        .bind(campaign_data.reward_format)
        .bind(campaign_data.discount_value)
        .bind(campaign_data.campaign_message)
        .bind(campaign_data.status.unwrap_or(CampaignStatus::Active))
        .fetch_one(&self.pool)
        .await
    }

    async fn get_campaigns(&self) -> Result<Vec<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT
                id, title, about_campaign, start_date, end_date,
                reward_type, reward_format, discount_value, campaign_message, status,
                created_at, updated_at
            FROM campaigns
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT
                id, title, about_campaign, start_date, end_date,
                reward_type, reward_format, discount_value, campaign_message, status,
                created_at, updated_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_campaign(
        &self,
        campaign_id: Uuid,
        campaign_data: UpdateCampaignDto,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE campaigns
            SET title = COALESCE($2, title),
                about_campaign = COALESCE($3, about_campaign),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                reward_type = COALESCE($6, reward_type),
                reward_format = COALESCE($7, reward_format),
                discount_value = COALESCE($8, discount_value),
                campaign_message = COALESCE($9, campaign_message),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, title, about_campaign, start_date, end_date,
                reward_type, reward_format, discount_value, campaign_message, status,
                created_at, updated_at
            "#,
        )
        .bind(campaign_id)
        .bind(campaign_data.title)
        .bind(campaign_data.about_campaign)
        .bind(campaign_data.start_date)
        .bind(campaign_data.end_date)
        .bind(campaign_data.reward_type)
        .bind(campaign_data.reward_format)
        .bind(campaign_data.discount_value)
        .bind(campaign_data.campaign_message)
        .bind(campaign_data.status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            r#"
            DELETE FROM campaigns
            WHERE id = $1
            RETURNING
                id, title, about_campaign, start_date, end_date,
                reward_type, reward_format, discount_value, campaign_message, status,
                created_at, updated_at
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await
    }
}
