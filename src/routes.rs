use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{auth, campaign, mailer, refer},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Auth and referral attribution
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/admin/login", post(auth::admin_login))
        // Referral data
        .route("/refer/data", get(refer::get_referral_data))
        .route("/refer/data/:email", get(refer::get_user_by_email))
        .route("/refer/by-coupon/:code", get(refer::get_referred_users))
        .route("/user/delete/:id", delete(refer::delete_user))
        // Campaigns
        .route("/campaign", post(campaign::create_campaign))
        .route("/campaign/data", get(campaign::get_campaigns))
        .route("/campaign/:id", get(campaign::get_campaign))
        .route("/campaign/:id", put(campaign::update_campaign))
        .route("/campaign/:id", delete(campaign::delete_campaign))
        // Mail
        .route("/send-email", post(mailer::broadcast_email))
        .route("/user/sendmail", post(mailer::send_user_mail))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({"status": "success"}))
}
