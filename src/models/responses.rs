use crate::models::domain::{ActionStatus, MatchReason, Profile};
use serde::{Deserialize, Serialize};

/// Pagination envelope shared by every list response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

/// A single recommended candidate with its advisory match reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedProfile {
    pub profile: Profile,
    pub reasons: Vec<MatchReason>,
}

/// Response for `GetRecommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRecommendationsResponse {
    pub profiles: Vec<RecommendedProfile>,
    pub pagination: Pagination,
}

/// Response for `RecordAction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordActionResponse {
    pub is_mutual_match: bool,
}

/// Response for `UpdateAction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateActionResponse {
    pub is_mutual_match: bool,
    pub was_mutual_match_broken: bool,
}

/// One entry in a match-history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchHistoryItem {
    pub profile: Profile,
    pub status: ActionStatus,
    pub acted_at: chrono::DateTime<chrono::Utc>,
}

/// Response for `GetMatchHistory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMatchHistoryResponse {
    pub items: Vec<MatchHistoryItem>,
    pub pagination: Pagination,
}

/// One entry in a mutual-matches listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutualMatchItem {
    pub profile: Profile,
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Response for `GetMutualMatches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMutualMatchesResponse {
    pub matches: Vec<MutualMatchItem>,
    pub pagination: Pagination,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
