use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct BroadcastMailDto {
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SendUserMailDto {
    #[validate(
        length(min = 1, message = "Email address is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastResultDto {
    pub status: String,
    pub message: String,
    pub sent: usize,
    pub failed: usize,
}
