use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::campaignmodel::{Campaign, CampaignStatus};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateCampaignDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(rename = "aboutCampaign")]
    pub about_campaign: Option<String>,

    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(rename = "rewardType")]
    pub reward_type: Option<String>,

    #[serde(rename = "rewardFormat")]
    pub reward_format: Option<String>,

    #[serde(rename = "discountValue")]
    pub discount_value: Option<i32>,

    #[serde(rename = "campaignMessage")]
    pub campaign_message: Option<String>,

    pub status: Option<CampaignStatus>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateCampaignDto {
    pub title: Option<String>,

    #[serde(rename = "aboutCampaign")]
    pub about_campaign: Option<String>,

    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(rename = "rewardType")]
    pub reward_type: Option<String>,

    #[serde(rename = "rewardFormat")]
    pub reward_format: Option<String>,

    #[serde(rename = "discountValue")]
    pub discount_value: Option<i32>,

    #[serde(rename = "campaignMessage")]
    pub campaign_message: Option<String>,

    pub status: Option<CampaignStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignData {
    pub campaign: Campaign,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignResponseDto {
    pub status: String,
    pub message: String,
    pub data: CampaignData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignListResponseDto {
    pub status: String,
    pub campaigns: Vec<Campaign>,
    pub results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dto_accepts_camel_case_body() {
        let body: CreateCampaignDto = serde_json::from_str(
            r#"{
                "title": "Summer Launch",
                "aboutCampaign": "Invite friends",
                "rewardType": "discount",
                "discountValue": 15,
                "status": "active"
            }"#,
        )
        .unwrap();
        assert_eq!(body.title, "Summer Launch");
        assert_eq!(body.discount_value, Some(15));
        assert_eq!(body.status, Some(CampaignStatus::Active));
    }

    #[test]
    fn create_dto_requires_title() {
        let body = CreateCampaignDto::default();
        assert!(body.validate().is_err());
    }
}
