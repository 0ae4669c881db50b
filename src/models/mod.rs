// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Action, ActionStatus, MatchReason, MutualMatch, Preference, Profile, RankedCandidate};
pub use requests::{
    GetMatchHistoryRequest, GetMutualMatchesRequest, GetRecommendationsRequest, RecordActionRequest,
    UpdateActionRequest,
};
pub use responses::{
    ErrorResponse, GetMatchHistoryResponse, GetMutualMatchesResponse, GetRecommendationsResponse,
    HealthResponse, MatchHistoryItem, MutualMatchItem, Pagination, RecommendedProfile,
    RecordActionResponse, UpdateActionResponse,
};
