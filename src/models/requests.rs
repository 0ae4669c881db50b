use crate::models::domain::ActionStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_limit() -> i64 {
    10
}

fn default_history_limit() -> i64 {
    20
}

/// Query parameters for `GET /api/v1/recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetRecommendationsRequest {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// Body for `POST /api/v1/actions`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordActionRequest {
    #[serde(rename = "targetProfileId")]
    pub target_profile_id: i64,
    pub action: ActionStatus,
}

/// Body for `PUT /api/v1/actions/{target_profile_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateActionRequest {
    pub action: ActionStatus,
}

/// Query parameters for `GET /api/v1/actions/history`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetMatchHistoryRequest {
    #[serde(default)]
    pub status: Option<ActionStatus>,
    #[serde(default = "default_history_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// Query parameters for `GET /api/v1/matches`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetMutualMatchesRequest {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
