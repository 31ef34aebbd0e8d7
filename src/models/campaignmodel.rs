use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "campaign_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Inactive,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Campaign {
    pub id: uuid::Uuid,
    pub title: String,
    pub about_campaign: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub reward_type: Option<String>,
    pub reward_format: Option<String>,
    pub discount_value: Option<i32>,
    pub campaign_message: Option<String>,
    pub status: CampaignStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&CampaignStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        let parsed: CampaignStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, CampaignStatus::Inactive);
    }
}
