use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One attribution edge: links a referrer's code to the referee that signed
/// up with it. `coupon_code` equals `referrer` at creation and is the key the
/// login flow correlates on.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Referral {
    pub id: Uuid,
    pub referrer: String,
    pub referee: String,
    pub campaign: Option<Uuid>,
    pub coupon_code: String,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
}
