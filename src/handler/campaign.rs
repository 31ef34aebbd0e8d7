use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::campaigndb::CampaignExt,
    dtos::campaigndtos::{
        CampaignData, CampaignListResponseDto, CampaignResponseDto, CreateCampaignDto,
        UpdateCampaignDto,
    },
    error::{ErrorMessage, HttpError},
    AppState,
};

pub async fn create_campaign(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCampaignDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let campaign = app_state
        .db_client
        .save_campaign(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(campaign = %campaign.title, id = %campaign.id, "campaign created");

    let response = CampaignResponseDto {
        status: "success".to_string(),
        message: "Campaign created successfully".to_string(),
        data: CampaignData { campaign },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_campaigns(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let campaigns = app_state
        .db_client
        .get_campaigns()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = CampaignListResponseDto {
        status: "success".to_string(),
        results: campaigns.len(),
        campaigns,
    };

    Ok(Json(response))
}

pub async fn get_campaign(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let campaign = app_state
        .db_client
        .get_campaign(campaign_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::CampaignNotFound.to_string()))?;

    let response = CampaignResponseDto {
        status: "success".to_string(),
        message: "Campaign retrieved successfully".to_string(),
        data: CampaignData { campaign },
    };

    Ok(Json(response))
}

pub async fn update_campaign(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
    Json(body): Json<UpdateCampaignDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let campaign = app_state
        .db_client
        .update_campaign(campaign_id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::CampaignNotFound.to_string()))?;

    let response = CampaignResponseDto {
        status: "success".to_string(),
        message: "Campaign updated successfully".to_string(),
        data: CampaignData { campaign },
    };

    Ok(Json(response))
}

pub async fn delete_campaign(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let campaign = app_state
        .db_client
        .delete_campaign(campaign_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::CampaignNotFound.to_string()))?;

    tracing::info!(campaign = %campaign.title, id = %campaign.id, "campaign deleted");

    let response = CampaignResponseDto {
        status: "success".to_string(),
        message: "Campaign deleted successfully".to_string(),
        data: CampaignData { campaign },
    };

    Ok(Json(response))
}
